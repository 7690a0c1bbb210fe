use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Query parameter carrying an invitation token (partner 1 only).
pub const INVITE_PARAM: &str = "data";

/// Query parameter carrying a report token (both partners).
pub const REPORT_PARAM: &str = "report";

/// One partner's share of a payload: display name plus packed answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPartner {
    pub name: String,
    pub answers: String,
}

impl SharedPartner {
    pub fn new(name: impl Into<String>, answers: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answers: answers.into(),
        }
    }
}

/// Everything that travels inside a share token.
///
/// On the wire this is the flat object `{ p1n, p1a, p2n?, p2a? }`. `p2n` and
/// `p2a` are either both present or both absent; anything else is rejected
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSharablePayload", into = "RawSharablePayload")]
pub struct SharablePayload {
    pub partner1: SharedPartner,
    pub partner2: Option<SharedPartner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareKind {
    Invite,
    Report,
}

impl ShareKind {
    pub const fn query_param(self) -> &'static str {
        match self {
            ShareKind::Invite => INVITE_PARAM,
            ShareKind::Report => REPORT_PARAM,
        }
    }
}

impl SharablePayload {
    pub fn invite(partner1: SharedPartner) -> Self {
        Self {
            partner1,
            partner2: None,
        }
    }

    pub fn report(partner1: SharedPartner, partner2: SharedPartner) -> Self {
        Self {
            partner1,
            partner2: Some(partner2),
        }
    }

    pub fn kind(&self) -> ShareKind {
        if self.partner2.is_some() {
            ShareKind::Report
        } else {
            ShareKind::Invite
        }
    }

    /// Complete an invitation with the second partner's entry.
    #[must_use]
    pub fn with_partner2(self, partner2: SharedPartner) -> Self {
        Self::report(self.partner1, partner2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSharablePayload {
    p1n: String,
    p1a: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p2n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p2a: Option<String>,
}

impl TryFrom<RawSharablePayload> for SharablePayload {
    type Error = String;

    fn try_from(raw: RawSharablePayload) -> std::result::Result<Self, Self::Error> {
        let partner1 = SharedPartner::new(raw.p1n, raw.p1a);
        let partner2 = match (raw.p2n, raw.p2a) {
            (Some(name), Some(answers)) => Some(SharedPartner::new(name, answers)),
            (None, None) => None,
            (Some(_), None) => return Err("p2n present without p2a".to_string()),
            (None, Some(_)) => return Err("p2a present without p2n".to_string()),
        };
        Ok(Self { partner1, partner2 })
    }
}

impl From<SharablePayload> for RawSharablePayload {
    fn from(payload: SharablePayload) -> Self {
        let (p2n, p2a) = match payload.partner2 {
            Some(p2) => (Some(p2.name), Some(p2.answers)),
            None => (None, None),
        };
        Self {
            p1n: payload.partner1.name,
            p1a: payload.partner1.answers,
            p2n,
            p2a,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invite_serializes_without_partner2_keys() {
        let payload = SharablePayload::invite(SharedPartner::new("Ana", "0g4"));
        let json = serialize_json(&payload).unwrap();
        assert_eq!(json, r#"{"p1n":"Ana","p1a":"0g4"}"#);
        assert_eq!(payload.kind(), ShareKind::Invite);
    }

    #[test]
    fn report_keeps_wire_key_order() {
        let payload = SharablePayload::report(
            SharedPartner::new("Ana", "55"),
            SharedPartner::new("Ben", "11"),
        );
        let json = serialize_json(&payload).unwrap();
        assert_eq!(json, r#"{"p1n":"Ana","p1a":"55","p2n":"Ben","p2a":"11"}"#);
        assert_eq!(payload.kind(), ShareKind::Report);
    }

    #[test]
    fn rejects_half_present_partner2() {
        let err = serde_json::from_str::<SharablePayload>(r#"{"p1n":"a","p1a":"1","p2n":"b"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("p2n present without p2a"), "{err}");
    }

    #[test]
    fn rejects_unknown_keys() {
        let res = serde_json::from_str::<SharablePayload>(r#"{"p1n":"a","p1a":"1","x":1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn with_partner2_upgrades_invite() {
        let invite = SharablePayload::invite(SharedPartner::new("Ana", "1"));
        let report = invite.with_partner2(SharedPartner::new("Ben", "2"));
        assert_eq!(report.kind(), ShareKind::Report);
        assert_eq!(report.partner2.unwrap().answers, "2");
        assert_eq!(ShareKind::Report.query_param(), "report");
    }
}
