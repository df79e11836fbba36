//! KSI (Klassifikation av stödinsatser) axes.
//!
//! A KSI code has three independent axes:
//! - **Target** (axel 1, inriktning): what the intervention addresses, aligned with ICF
//! - **Action** (axel 2, agerande): what the professional does
//! - **Status** (axel 3): where the intervention is in its lifecycle
//!
//! The full code is written `{target}-{action}-{status}`, e.g. `SCA-PM-2`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// KSI axis 1: target (inriktning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KsiTarget {
    // Learning and applying knowledge (d1)
    SA1,
    SA2,
    SB2,
    SBQ,
    SBV,
    SC2,
    SCA,
    SC4,
    SC5,
    SCJ,
    SCL,
    SBX,
    // Communication (d3)
    SE2,
    SEA,
    SED,
    S2,
    SFA,
    SFB,
    SG2,
    SGA,
    SGG,
    // General tasks (d2)
    SDA,
    SDJ,
    SDK,
    // Mobility (d4)
    SH2,
    SJ2,
    SJB,
    SK2,
    SIF,
    SIA,
    // Self-care (d5)
    SM1,
    SMB,
    SMC,
    SMD,
    // Recreation (d9)
    SY,
    // Interpersonal (d7)
    SUA,
    // Body functions (b)
    SAT,
    SCR,
    SAS,
    SAH,
    // Environmental (e)
    QD2,
    QE2,
    QF,
}

impl KsiTarget {
    pub const ALL: [KsiTarget; 43] = [
        KsiTarget::SA1,
        KsiTarget::SA2,
        KsiTarget::SB2,
        KsiTarget::SBQ,
        KsiTarget::SBV,
        KsiTarget::SC2,
        KsiTarget::SCA,
        KsiTarget::SC4,
        KsiTarget::SC5,
        KsiTarget::SCJ,
        KsiTarget::SCL,
        KsiTarget::SBX,
        KsiTarget::SE2,
        KsiTarget::SEA,
        KsiTarget::SED,
        KsiTarget::S2,
        KsiTarget::SFA,
        KsiTarget::SFB,
        KsiTarget::SG2,
        KsiTarget::SGA,
        KsiTarget::SGG,
        KsiTarget::SDA,
        KsiTarget::SDJ,
        KsiTarget::SDK,
        KsiTarget::SH2,
        KsiTarget::SJ2,
        KsiTarget::SJB,
        KsiTarget::SK2,
        KsiTarget::SIF,
        KsiTarget::SIA,
        KsiTarget::SM1,
        KsiTarget::SMB,
        KsiTarget::SMC,
        KsiTarget::SMD,
        KsiTarget::SY,
        KsiTarget::SUA,
        KsiTarget::SAT,
        KsiTarget::SCR,
        KsiTarget::SAS,
        KsiTarget::SAH,
        KsiTarget::QD2,
        KsiTarget::QE2,
        KsiTarget::QF,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KsiTarget::SA1 => "SA1",
            KsiTarget::SA2 => "SA2",
            KsiTarget::SB2 => "SB2",
            KsiTarget::SBQ => "SBQ",
            KsiTarget::SBV => "SBV",
            KsiTarget::SC2 => "SC2",
            KsiTarget::SCA => "SCA",
            KsiTarget::SC4 => "SC4",
            KsiTarget::SC5 => "SC5",
            KsiTarget::SCJ => "SCJ",
            KsiTarget::SCL => "SCL",
            KsiTarget::SBX => "SBX",
            KsiTarget::SE2 => "SE2",
            KsiTarget::SEA => "SEA",
            KsiTarget::SED => "SED",
            KsiTarget::S2 => "S2",
            KsiTarget::SFA => "SFA",
            KsiTarget::SFB => "SFB",
            KsiTarget::SG2 => "SG2",
            KsiTarget::SGA => "SGA",
            KsiTarget::SGG => "SGG",
            KsiTarget::SDA => "SDA",
            KsiTarget::SDJ => "SDJ",
            KsiTarget::SDK => "SDK",
            KsiTarget::SH2 => "SH2",
            KsiTarget::SJ2 => "SJ2",
            KsiTarget::SJB => "SJB",
            KsiTarget::SK2 => "SK2",
            KsiTarget::SIF => "SIF",
            KsiTarget::SIA => "SIA",
            KsiTarget::SM1 => "SM1",
            KsiTarget::SMB => "SMB",
            KsiTarget::SMC => "SMC",
            KsiTarget::SMD => "SMD",
            KsiTarget::SY => "SY",
            KsiTarget::SUA => "SUA",
            KsiTarget::SAT => "SAT",
            KsiTarget::SCR => "SCR",
            KsiTarget::SAS => "SAS",
            KsiTarget::SAH => "SAH",
            KsiTarget::QD2 => "QD2",
            KsiTarget::QE2 => "QE2",
            KsiTarget::QF => "QF",
        }
    }
}

impl fmt::Display for KsiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KsiTarget {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        KsiTarget::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::invalid("KSI target", s))
    }
}

/// KSI axis 2: action (agerande).
///
/// `A*` codes are investigative or follow-up actions, the rest support the
/// individual directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KsiAction {
    AA,
    AC,
    AM,
    AS,
    AT,
    AU,
    AV,
    AZ,
    PH,
    PM,
    PN,
    PU,
    PV,
    RA,
    RB,
    RC,
    RD,
    SM,
    SZ,
}

impl KsiAction {
    pub const ALL: [KsiAction; 19] = [
        KsiAction::AA,
        KsiAction::AC,
        KsiAction::AM,
        KsiAction::AS,
        KsiAction::AT,
        KsiAction::AU,
        KsiAction::AV,
        KsiAction::AZ,
        KsiAction::PH,
        KsiAction::PM,
        KsiAction::PN,
        KsiAction::PU,
        KsiAction::PV,
        KsiAction::RA,
        KsiAction::RB,
        KsiAction::RC,
        KsiAction::RD,
        KsiAction::SM,
        KsiAction::SZ,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KsiAction::AA => "AA",
            KsiAction::AC => "AC",
            KsiAction::AM => "AM",
            KsiAction::AS => "AS",
            KsiAction::AT => "AT",
            KsiAction::AU => "AU",
            KsiAction::AV => "AV",
            KsiAction::AZ => "AZ",
            KsiAction::PH => "PH",
            KsiAction::PM => "PM",
            KsiAction::PN => "PN",
            KsiAction::PU => "PU",
            KsiAction::PV => "PV",
            KsiAction::RA => "RA",
            KsiAction::RB => "RB",
            KsiAction::RC => "RC",
            KsiAction::RD => "RD",
            KsiAction::SM => "SM",
            KsiAction::SZ => "SZ",
        }
    }

    /// Swedish label for the action.
    pub fn label(&self) -> &'static str {
        match self {
            KsiAction::AA => "Bedömning",
            KsiAction::AC => "Manualbaserat test eller samtal",
            KsiAction::AM => "Observation",
            KsiAction::AS => "Utredande samtal",
            KsiAction::AT => "Inhämta uppgifter från professionell",
            KsiAction::AU => "Inhämta uppgifter från annan",
            KsiAction::AV => "Uppföljande samtal",
            KsiAction::AZ => "Utredande aktivitet, ospecificerad",
            KsiAction::PH => "Färdighetsträning",
            KsiAction::PM => "Undervisning",
            KsiAction::PN => "Råd eller information",
            KsiAction::PU => "Stödjande samtal",
            KsiAction::PV => "Behandlande samtal",
            KsiAction::RA => "Kompensatoriskt stöd",
            KsiAction::RB => "Praktiskt stöd",
            KsiAction::RC => "Emotionellt stöd",
            KsiAction::RD => "Tillhandahållande",
            KsiAction::SM => "Hantering av utrustning eller miljö",
            KsiAction::SZ => "Individstödjande, ospecificerad",
        }
    }

    /// Returns true for investigative or follow-up actions (category A).
    pub fn is_investigative(&self) -> bool {
        self.as_str().starts_with('A')
    }
}

impl fmt::Display for KsiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KsiAction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        KsiAction::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::invalid("KSI action", s))
    }
}

/// KSI axis 3: status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum KsiStatus {
    #[default]
    #[serde(rename = "1")]
    Planned,
    #[serde(rename = "2")]
    Ongoing,
    #[serde(rename = "3")]
    Completed,
    #[serde(rename = "4")]
    Discontinued,
}

impl KsiStatus {
    pub const ALL: [KsiStatus; 4] = [
        KsiStatus::Planned,
        KsiStatus::Ongoing,
        KsiStatus::Completed,
        KsiStatus::Discontinued,
    ];

    /// Returns the digit used in full KSI codes.
    pub fn as_code(&self) -> &'static str {
        match self {
            KsiStatus::Planned => "1",
            KsiStatus::Ongoing => "2",
            KsiStatus::Completed => "3",
            KsiStatus::Discontinued => "4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KsiStatus::Planned => "Planerad",
            KsiStatus::Ongoing => "Pågående",
            KsiStatus::Completed => "Avslutad",
            KsiStatus::Discontinued => "Avbruten",
        }
    }
}

impl fmt::Display for KsiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for KsiStatus {
    type Err = ModelError;

    /// Accepts the axis digit or the English/Swedish status name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "planned" | "planerad" => Ok(KsiStatus::Planned),
            "2" | "ongoing" | "pågående" => Ok(KsiStatus::Ongoing),
            "3" | "completed" | "avslutad" => Ok(KsiStatus::Completed),
            "4" | "discontinued" | "avbruten" => Ok(KsiStatus::Discontinued),
            _ => Err(ModelError::invalid("KSI status", s)),
        }
    }
}

/// A complete three-axis KSI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KsiCode {
    pub target: KsiTarget,
    pub action: KsiAction,
    pub status: KsiStatus,
}

impl KsiCode {
    pub fn new(target: KsiTarget, action: KsiAction, status: KsiStatus) -> Self {
        Self {
            target,
            action,
            status,
        }
    }

    /// Full code string, e.g. `SCA-PM-2`.
    pub fn full_code(&self) -> String {
        format!(
            "{}-{}-{}",
            self.target.as_str(),
            self.action.as_str(),
            self.status.as_code()
        )
    }

    /// Human-readable description joining the three axis labels.
    ///
    /// The target label comes from the reference dataset, so it is passed in.
    pub fn describe(&self, target_name: &str) -> String {
        format!(
            "{} - {} - {}",
            target_name,
            self.action.label(),
            self.status.label()
        )
    }
}

impl fmt::Display for KsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_code())
    }
}

impl FromStr for KsiCode {
    type Err = ModelError;

    /// Parses `TARGET-ACTION-STATUS`; every axis must be a known value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('-');
        let (Some(target), Some(action), Some(status), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ModelError::invalid("KSI code", s));
        };
        Ok(Self {
            target: target.parse()?,
            action: action.parse()?,
            status: status.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_round_trips_through_str() {
        for target in KsiTarget::ALL {
            assert_eq!(target.as_str().parse::<KsiTarget>().unwrap(), target);
        }
        assert_eq!("sca".parse::<KsiTarget>().unwrap(), KsiTarget::SCA);
        assert!("XYZ".parse::<KsiTarget>().is_err());
    }

    #[test]
    fn action_and_status_parse() {
        assert_eq!("pm".parse::<KsiAction>().unwrap(), KsiAction::PM);
        assert_eq!("2".parse::<KsiStatus>().unwrap(), KsiStatus::Ongoing);
        assert_eq!("Avbruten".parse::<KsiStatus>().unwrap(), KsiStatus::Discontinued);
        assert!("5".parse::<KsiStatus>().is_err());
        assert!("QQ".parse::<KsiAction>().is_err());
    }

    #[test]
    fn investigative_actions() {
        assert!(KsiAction::AA.is_investigative());
        assert!(KsiAction::AZ.is_investigative());
        assert!(!KsiAction::PM.is_investigative());
    }

    #[test]
    fn full_code_and_parse() {
        let code = KsiCode::new(KsiTarget::SCA, KsiAction::PM, KsiStatus::Ongoing);
        assert_eq!(code.full_code(), "SCA-PM-2");
        assert_eq!("SCA-PM-2".parse::<KsiCode>().unwrap(), code);
        assert!("SCA-PM".parse::<KsiCode>().is_err());
        assert!("SCA-PM-2-1".parse::<KsiCode>().is_err());
        assert!("SCA-XX-2".parse::<KsiCode>().is_err());
    }

    #[test]
    fn status_serializes_as_digit() {
        assert_eq!(serde_json::to_string(&KsiStatus::Completed).unwrap(), "\"3\"");
        let code: KsiCode =
            serde_json::from_str(r#"{"target":"SCA","action":"PM","status":"2"}"#).unwrap();
        assert_eq!(code.full_code(), "SCA-PM-2");
    }
}
