//! The share command: produce a shareable artifact for a meeting link.

use std::path::PathBuf;

use chrono::Utc;

use meetdash_api::MeetingService;
use meetdash_core::{
    AppState, ArtifactRenderer, PendingShare, RedirectCountdown, ShareKind, ShareState,
};

use crate::actions;
use crate::error::{ClientError, ClientResult};
use crate::qr::{PlainUrlRenderer, SvgQrRenderer, TerminalQrRenderer};
use crate::session::SessionStore;

/// Options for the share command.
#[derive(Debug, Clone)]
pub struct ShareOptions {
    pub host: bool,
    pub gate: Option<String>,
    pub qr: bool,
    pub svg: Option<PathBuf>,
    pub copy: bool,
    pub open: bool,
    pub delay: u32,
}

/// Shares a meeting link as one or more artifacts.
pub async fn share(
    service: &MeetingService,
    store: &SessionStore,
    meeting_id: &str,
    options: &ShareOptions,
) -> ClientResult<()> {
    let mut state = AppState::new();
    let token = state.begin_fetch();
    let meetings = service.list_meetings().await?;
    let now = Utc::now();
    state.apply_meetings(token, meetings, now);

    let meeting = state
        .meetings()
        .iter()
        .find(|m| m.id == meeting_id)
        .cloned()
        .ok_or_else(|| ClientError::Input(format!("no meeting with id {meeting_id:?}")))?;

    let actions_available = meeting.actionability(now);
    let (url, kind) = if options.host {
        if !actions_available.host_enabled {
            return Err(ClientError::Action(
                "meeting has already started; the host link is disabled".to_string(),
            ));
        }
        unlock_host_gate(store, options.gate.as_deref())?;
        let url = meeting
            .host_url
            .clone()
            .ok_or_else(|| ClientError::Action("meeting has no host link".to_string()))?;
        (url, ShareKind::Host)
    } else {
        if !actions_available.join_enabled {
            return Err(ClientError::Action(
                "meeting has already started; the join link is disabled".to_string(),
            ));
        }
        (meeting.join_url.clone(), ShareKind::Join)
    };

    let mut share_state = ShareState::new();
    share_state.open(PendingShare::new(url.clone(), kind, meeting.id.clone()));

    if let Some(ref path) = options.svg {
        let artifact = SvgQrRenderer::default()
            .render(&url)
            .map_err(|e| ClientError::Action(e.to_string()))?;
        std::fs::write(path, artifact.as_str())?;
        println!("QR code written to {}", path.display());
    }

    if options.qr {
        let artifact = TerminalQrRenderer
            .render(&url)
            .map_err(|e| ClientError::Action(e.to_string()))?;
        println!("{}", artifact.as_str());
    }

    if options.copy {
        actions::copy_url(&mut share_state, &url)?;
        if share_state.copied_visible(Utc::now()) {
            println!("Copied {} to clipboard.", kind.display_name());
        }
    }

    if options.open {
        actions::redirect_after_countdown(RedirectCountdown::with_delay(&url, options.delay))
            .await?;
    } else if !options.qr && !options.copy && options.svg.is_none() {
        // No artifact requested: fall back to the plain URL.
        let artifact = PlainUrlRenderer
            .render(&url)
            .map_err(|e| ClientError::Action(e.to_string()))?;
        println!("{}", artifact.as_str());
    }

    share_state.dismiss();
    Ok(())
}

/// Checks the host gate, when one is configured.
///
/// The gate is a local convenience lock only (see the session module); host
/// URLs are served by the remote service regardless of it.
fn unlock_host_gate(store: &SessionStore, candidate: Option<&str>) -> ClientResult<()> {
    let session = store.require()?;
    match session.host_gate {
        None => Ok(()),
        Some(gate) => {
            let candidate = candidate.ok_or_else(|| {
                ClientError::Input("a host gate is set; pass --gate <password>".to_string())
            })?;
            if gate.verify(candidate) {
                Ok(())
            } else {
                Err(ClientError::Input(
                    "host gate password does not match".to_string(),
                ))
            }
        }
    }
}
