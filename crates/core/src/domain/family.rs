use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::require_name;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FamilyMemberId(pub String);

impl FamilyMemberId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for FamilyMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Age bracket used for baseline portion sizing.
///
/// Serialized with English snake_case labels; the Japanese labels of the household data
/// set are accepted as aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    #[serde(alias = "乳幼児")]
    Infant,
    #[serde(alias = "小学生")]
    Elementary,
    #[serde(alias = "中学生")]
    MiddleSchool,
    #[serde(alias = "高校生")]
    HighSchool,
    #[serde(alias = "大学生")]
    University,
    #[serde(alias = "20代")]
    Twenties,
    #[serde(alias = "30代")]
    Thirties,
    #[serde(alias = "40代")]
    Forties,
    #[serde(alias = "50代")]
    Fifties,
    #[serde(alias = "60代以上")]
    SixtiesPlus,
}

impl LifeStage {
    pub const ALL: [LifeStage; 10] = [
        LifeStage::Infant,
        LifeStage::Elementary,
        LifeStage::MiddleSchool,
        LifeStage::HighSchool,
        LifeStage::University,
        LifeStage::Twenties,
        LifeStage::Thirties,
        LifeStage::Forties,
        LifeStage::Fifties,
        LifeStage::SixtiesPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifeStage::Infant => "infant",
            LifeStage::Elementary => "elementary",
            LifeStage::MiddleSchool => "middle_school",
            LifeStage::HighSchool => "high_school",
            LifeStage::University => "university",
            LifeStage::Twenties => "twenties",
            LifeStage::Thirties => "thirties",
            LifeStage::Forties => "forties",
            LifeStage::Fifties => "fifties",
            LifeStage::SixtiesPlus => "sixties_plus",
        }
    }

    pub fn local_label(&self) -> &'static str {
        match self {
            LifeStage::Infant => "乳幼児",
            LifeStage::Elementary => "小学生",
            LifeStage::MiddleSchool => "中学生",
            LifeStage::HighSchool => "高校生",
            LifeStage::University => "大学生",
            LifeStage::Twenties => "20代",
            LifeStage::Thirties => "30代",
            LifeStage::Forties => "40代",
            LifeStage::Fifties => "50代",
            LifeStage::SixtiesPlus => "60代以上",
        }
    }
}

impl std::str::FromStr for LifeStage {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        LifeStage::ALL
            .into_iter()
            .find(|stage| {
                stage.as_str().eq_ignore_ascii_case(trimmed) || stage.local_label() == trimmed
            })
            .ok_or_else(|| {
                DomainError::validation("lifeStage", format!("unknown life stage `{trimmed}`"))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appetite {
    #[serde(alias = "小食")]
    Light,
    #[serde(alias = "普通")]
    Normal,
    #[serde(alias = "大食い")]
    Heavy,
}

impl Appetite {
    pub const ALL: [Appetite; 3] = [Appetite::Light, Appetite::Normal, Appetite::Heavy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Appetite::Light => "light",
            Appetite::Normal => "normal",
            Appetite::Heavy => "heavy",
        }
    }

    pub fn local_label(&self) -> &'static str {
        match self {
            Appetite::Light => "小食",
            Appetite::Normal => "普通",
            Appetite::Heavy => "大食い",
        }
    }
}

impl std::str::FromStr for Appetite {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Appetite::ALL
            .into_iter()
            .find(|appetite| {
                appetite.as_str().eq_ignore_ascii_case(trimmed) || appetite.local_label() == trimmed
            })
            .ok_or_else(|| {
                DomainError::validation("appetite", format!("unknown appetite `{trimmed}`"))
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: FamilyMemberId,
    pub name: String,
    pub life_stage: LifeStage,
    pub appetite: Appetite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FamilyMember {
    pub fn from_draft(id: FamilyMemberId, draft: FamilyMemberDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            life_stage: draft.life_stage,
            appetite: draft.appetite,
            notes: draft.notes,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn apply_draft(&mut self, draft: FamilyMemberDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.life_stage = draft.life_stage;
        self.appetite = draft.appetite;
        self.notes = draft.notes;
        self.updated_at = Some(now);
    }
}

/// The slice of a family member the suggestion engine needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionProfile {
    pub id: FamilyMemberId,
    pub name: String,
    pub life_stage: LifeStage,
    pub appetite: Appetite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberDraft {
    pub name: String,
    pub life_stage: LifeStage,
    pub appetite: Appetite,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FamilyMemberDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_name("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Appetite, FamilyMemberDraft, LifeStage, PortionProfile};

    #[test]
    fn life_stage_parses_english_and_local_labels() {
        assert_eq!("high_school".parse::<LifeStage>(), Ok(LifeStage::HighSchool));
        assert_eq!("高校生".parse::<LifeStage>(), Ok(LifeStage::HighSchool));
        assert_eq!("60代以上".parse::<LifeStage>(), Ok(LifeStage::SixtiesPlus));
        assert!("toddler".parse::<LifeStage>().is_err());
    }

    #[test]
    fn appetite_parses_english_and_local_labels() {
        assert_eq!("Heavy".parse::<Appetite>(), Ok(Appetite::Heavy));
        assert_eq!("小食".parse::<Appetite>(), Ok(Appetite::Light));
        assert!("ravenous".parse::<Appetite>().is_err());
    }

    #[test]
    fn profile_json_accepts_local_aliases() {
        let json = r#"{"id":"f-1","name":"はると","lifeStage":"小学生","appetite":"普通"}"#;
        let profile: PortionProfile = serde_json::from_str(json).expect("parse profile");
        assert_eq!(profile.life_stage, LifeStage::Elementary);
        assert_eq!(profile.appetite, Appetite::Normal);

        let value = serde_json::to_value(&profile).expect("serialize profile");
        assert_eq!(value["lifeStage"], "elementary");
    }

    #[test]
    fn unknown_life_stage_is_rejected_at_the_boundary() {
        let json = r#"{"name":"x","lifeStage":"toddler","appetite":"normal"}"#;
        assert!(serde_json::from_str::<FamilyMemberDraft>(json).is_err());
    }

    #[test]
    fn draft_requires_a_name() {
        let draft = FamilyMemberDraft {
            name: String::new(),
            life_stage: LifeStage::Thirties,
            appetite: Appetite::Normal,
            notes: None,
        };
        assert!(draft.validate().is_err());
    }
}
