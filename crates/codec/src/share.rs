use rapport_assessment::{AnswerSet, Catalog, Report};
use rapport_protocol::{SharablePayload, SharedPartner, INVITE_PARAM, REPORT_PARAM};

use crate::error::Result;
use crate::pack::unpack;
use crate::token::{decode_for, try_encode};

/// What a landing URL asks the application to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedState {
    /// No usable token: start the questionnaire from the beginning.
    Fresh,
    /// Partner 1 finished and invites partner 2.
    Invite(SharablePayload),
    /// Both partners finished.
    Report(SharablePayload),
}

impl SharedState {
    pub fn payload(&self) -> Option<&SharablePayload> {
        match self {
            SharedState::Fresh => None,
            SharedState::Invite(payload) | SharedState::Report(payload) => Some(payload),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SharedState::Fresh => "fresh",
            SharedState::Invite(_) => "invite",
            SharedState::Report(_) => "report",
        }
    }

    /// Rebuild the full report carried by a `Report` state.
    pub fn report(&self, catalog: &Catalog) -> Option<Report> {
        match self {
            SharedState::Report(payload) => rebuild_report(catalog, payload),
            SharedState::Fresh | SharedState::Invite(_) => None,
        }
    }
}

/// Report for a two-partner payload; `None` for an invitation.
pub fn rebuild_report(catalog: &Catalog, payload: &SharablePayload) -> Option<Report> {
    let partner2 = payload.partner2.as_ref()?;
    Some(Report::build(
        catalog,
        payload.partner1.name.clone(),
        &unpack_partner(&payload.partner1),
        partner2.name.clone(),
        &unpack_partner(partner2),
    ))
}

fn unpack_partner(partner: &SharedPartner) -> AnswerSet {
    unpack(&partner.answers)
}

/// Page URL without query, fragment or a `blob:` prefix.
pub fn sharable_base_url(href: &str) -> String {
    let without_query = href.split(['?', '#']).next().unwrap_or_default();
    without_query
        .strip_prefix("blob:")
        .unwrap_or(without_query)
        .to_string()
}

/// Whether a link built from `href` could be opened on another device.
pub fn is_environment_sharable(href: &str) -> bool {
    !(href.starts_with("blob:")
        || href.starts_with("file:")
        || href.contains("localhost")
        || href.contains("127.0.0.1"))
}

/// `base?data=<token>` for invitations, `base?report=<token>` for reports.
///
/// Fails instead of producing a link whose token would not decode.
pub fn share_url(base: &str, payload: &SharablePayload) -> Result<String> {
    let token = try_encode(payload)?;
    Ok(format!(
        "{}?{}={}",
        sharable_base_url(base),
        payload.kind().query_param(),
        urlencoding::encode(&token)
    ))
}

pub fn invite_url(base: &str, partner1: SharedPartner) -> Result<String> {
    share_url(base, &SharablePayload::invite(partner1))
}

pub fn report_url(base: &str, partner1: SharedPartner, partner2: SharedPartner) -> Result<String> {
    share_url(base, &SharablePayload::report(partner1, partner2))
}

fn query_param(input: &str, key: &str) -> Option<String> {
    let query = match input.split_once('?') {
        Some((_, rest)) => rest,
        None => input,
    };
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, value)| match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_string(),
        })
}

/// Work out what a landing URL (or bare query string) should show.
///
/// `report` wins over `data`. A parameter that is present but does not hold
/// a usable token falls back to `Fresh` rather than failing.
pub fn parse_shared_state(catalog: &Catalog, url_or_query: &str) -> SharedState {
    if let Some(token) = query_param(url_or_query, REPORT_PARAM) {
        return match decode_for(catalog, &token) {
            Some(payload) if payload.partner2.is_some() => SharedState::Report(payload),
            Some(_) => {
                log::warn!("Report link carries only one partner; starting fresh");
                SharedState::Fresh
            }
            None => {
                log::warn!("Report link could not be decoded; starting fresh");
                SharedState::Fresh
            }
        };
    }

    if let Some(token) = query_param(url_or_query, INVITE_PARAM) {
        return match decode_for(catalog, &token) {
            Some(payload) => SharedState::Invite(SharablePayload::invite(payload.partner1)),
            None => {
                log::warn!("Invitation link could not be decoded; starting fresh");
                SharedState::Fresh
            }
        };
    }

    SharedState::Fresh
}
