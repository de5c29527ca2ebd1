//! Host-gate management commands.

use crate::error::ClientResult;
use crate::session::{HostGate, SessionStore};

/// Stores a gate password on the current session.
pub fn set(store: &SessionStore, password: &str) -> ClientResult<()> {
    let mut session = store.require()?;
    session.host_gate = Some(HostGate::seal(password));
    store.save(&session)?;
    println!("Host gate set.");
    println!("Note: the gate is a local convenience lock, not access control.");
    Ok(())
}

/// Removes the gate from the current session.
pub fn clear(store: &SessionStore) -> ClientResult<()> {
    let mut session = store.require()?;
    session.host_gate = None;
    store.save(&session)?;
    println!("Host gate removed.");
    Ok(())
}

/// Shows whether a gate is configured.
pub fn status(store: &SessionStore) -> ClientResult<()> {
    let session = store.require()?;
    if session.host_gate.is_some() {
        println!("A host gate is set; host links require --gate <password>.");
    } else {
        println!("No host gate set.");
    }
    Ok(())
}
