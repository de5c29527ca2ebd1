//! Country/state reference data command.

use meetdash_api::MeetingService;
use meetdash_core::AppState;

use crate::error::ClientResult;

/// Fetches and prints the countries with their states.
pub async fn list(service: &MeetingService) -> ClientResult<()> {
    let mut state = AppState::new();
    state.set_countries(service.countries_with_states().await?);

    if !state.has_countries() {
        println!("No reference data available.");
        return Ok(());
    }

    for country in state.countries() {
        println!("{:>5}  {}", country.id, country.name);
        for s in &country.states {
            println!("       {:>5}  {}", s.id, s.name);
        }
    }
    Ok(())
}
