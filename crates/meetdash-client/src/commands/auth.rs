//! Login, registration, and session commands.

use tracing::warn;

use meetdash_api::{Credentials, MeetingService, Registration};

use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};

/// Signs in and persists the session.
pub async fn login(
    service: &MeetingService,
    store: &SessionStore,
    email: String,
    password: String,
    country_id: Option<i64>,
    state_id: Option<i64>,
) -> ClientResult<()> {
    let credentials = Credentials {
        email,
        password,
        country_id,
        state_id,
    };
    let login = service.login(&credentials).await?;

    // A re-login keeps the previously configured host gate.
    let host_gate = store.load()?.and_then(|s| s.host_gate);
    let session = Session {
        user: login.user,
        access_token: login.access_token,
        host_gate,
    };
    store.save(&session)?;

    println!(
        "Signed in as {} <{}>.",
        session.user.full_name(),
        session.user.email
    );
    Ok(())
}

/// Creates a new account.
///
/// The password confirmation is checked here, before any network call.
#[allow(clippy::too_many_arguments)]
pub async fn register(
    service: &MeetingService,
    first_name: String,
    last_name: String,
    email: String,
    mobile_number: String,
    password: String,
    confirm_password: String,
    country_id: i64,
    state_id: i64,
) -> ClientResult<()> {
    if password != confirm_password {
        return Err(ClientError::Input("passwords do not match".to_string()));
    }

    let registration = Registration {
        first_name,
        last_name,
        email,
        mobile_number,
        password,
        country_id,
        state_id,
    };
    service.register(&registration).await?;

    println!(
        "Account created. Sign in with: meetdash login --email {}",
        registration.email
    );
    Ok(())
}

/// Clears the stored session.
pub fn logout(store: &SessionStore) -> ClientResult<()> {
    store.clear()?;
    println!("Signed out.");
    Ok(())
}

/// Shows the logged-in user and their resolved country/state.
pub async fn whoami(service: &MeetingService, store: &SessionStore) -> ClientResult<()> {
    let session = store.require()?;
    let user = &session.user;

    println!("{} <{}>", user.full_name(), user.email);

    // Reference data is display-only here; a fetch failure degrades to
    // "N/A" instead of failing the command.
    match service.countries_with_states().await {
        Ok(countries) => {
            let location = user.location(&countries);
            println!(
                "Country: {}",
                location.country.map_or("N/A", |c| c.name.as_str())
            );
            println!(
                "State:   {}",
                location.state.map_or("N/A", |s| s.name.as_str())
            );
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch country reference data");
            println!("Country: N/A");
            println!("State:   N/A");
        }
    }
    Ok(())
}
