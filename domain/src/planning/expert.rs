//! Expert roster used for planning prompts and analysis routing.

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A domain expert a subtopic can be routed to.
///
/// The business analyst is the fallback when routing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpertDomain {
    Technology,
    Legal,
    #[default]
    BusinessAnalyst,
    HumanResources,
    CompetitiveIntelligence,
    Financial,
    Operations,
    Sales,
    Marketing,
    CustomerExperience,
    PublicRelations,
    SupplyChain,
}

impl ExpertDomain {
    pub const ALL: [ExpertDomain; 12] = [
        ExpertDomain::Technology,
        ExpertDomain::Legal,
        ExpertDomain::BusinessAnalyst,
        ExpertDomain::HumanResources,
        ExpertDomain::CompetitiveIntelligence,
        ExpertDomain::Financial,
        ExpertDomain::Operations,
        ExpertDomain::Sales,
        ExpertDomain::Marketing,
        ExpertDomain::CustomerExperience,
        ExpertDomain::PublicRelations,
        ExpertDomain::SupplyChain,
    ];

    /// Identifier used in prompts and routing replies.
    pub fn key(&self) -> &'static str {
        match self {
            ExpertDomain::Technology => "technology_expert",
            ExpertDomain::Legal => "legal_expert",
            ExpertDomain::BusinessAnalyst => "business_analyst",
            ExpertDomain::HumanResources => "hr_expert",
            ExpertDomain::CompetitiveIntelligence => "competitive_intelligence_expert",
            ExpertDomain::Financial => "financial_expert",
            ExpertDomain::Operations => "operations_expert",
            ExpertDomain::Sales => "sales_expert",
            ExpertDomain::Marketing => "marketing_expert",
            ExpertDomain::CustomerExperience => "customer_experience_expert",
            ExpertDomain::PublicRelations => "public_relations_expert",
            ExpertDomain::SupplyChain => "supply_chain_expert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExpertDomain::Technology => "software, AI, hardware, IT topics",
            ExpertDomain::Legal => "laws, contracts, compliance",
            ExpertDomain::BusinessAnalyst => "strategy, planning, business processes",
            ExpertDomain::HumanResources => "hiring, policies, training",
            ExpertDomain::CompetitiveIntelligence => "market research, competitor analysis",
            ExpertDomain::Financial => "investments, accounting, budgeting",
            ExpertDomain::Operations => "logistics, workflows",
            ExpertDomain::Sales => "sales strategies, CRM",
            ExpertDomain::Marketing => "campaigns, branding",
            ExpertDomain::CustomerExperience => "customer satisfaction, support strategy",
            ExpertDomain::PublicRelations => "media, reputation, communications",
            ExpertDomain::SupplyChain => "procurement, inventory, logistics",
        }
    }

    /// Title-case role name, e.g. "Competitive Intelligence Expert".
    pub fn role_name(&self) -> String {
        self.key()
            .split('_')
            .map(|word| match word {
                "hr" => "HR".to_string(),
                w => {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `- key → description` lines for every expert.
    pub fn roster() -> String {
        Self::ALL
            .iter()
            .map(|e| format!("- {} → {}", e.key(), e.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ExpertDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExpertDomain {
    type Err = ValidationError;

    /// Accepts the key, with or without the `_expert` suffix, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|e| {
                let key = e.key();
                normalized == key || Some(normalized.as_str()) == key.strip_suffix("_expert")
            })
            .ok_or_else(|| ValidationError::UnknownExpert(s.to_string()))
    }
}

impl TryFrom<String> for ExpertDomain {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExpertDomain> for String {
    fn from(e: ExpertDomain) -> Self {
        e.key().to_string()
    }
}

/// Routing reply: which expert should analyze a subtopic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertDecision {
    pub expert: ExpertDomain,
}

impl ExpertDecision {
    pub fn json_schema() -> serde_json::Value {
        let keys: Vec<&str> = ExpertDomain::ALL.iter().map(ExpertDomain::key).collect();
        serde_json::json!({
            "type": "object",
            "properties": { "expert": { "type": "string", "enum": keys } },
            "required": ["expert"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_and_short_forms() {
        assert_eq!("financial_expert".parse::<ExpertDomain>(), Ok(ExpertDomain::Financial));
        assert_eq!("Financial".parse::<ExpertDomain>(), Ok(ExpertDomain::Financial));
        assert_eq!("business_analyst".parse::<ExpertDomain>(), Ok(ExpertDomain::BusinessAnalyst));
        assert_eq!("supply-chain".parse::<ExpertDomain>(), Ok(ExpertDomain::SupplyChain));
        assert_eq!(
            "astrologer".parse::<ExpertDomain>(),
            Err(ValidationError::UnknownExpert("astrologer".to_string()))
        );
    }

    #[test]
    fn test_every_key_round_trips() {
        for expert in ExpertDomain::ALL {
            assert_eq!(expert.key().parse::<ExpertDomain>(), Ok(expert));
        }
    }

    #[test]
    fn test_role_name() {
        assert_eq!(ExpertDomain::HumanResources.role_name(), "HR Expert");
        assert_eq!(
            ExpertDomain::CompetitiveIntelligence.role_name(),
            "Competitive Intelligence Expert"
        );
        assert_eq!(ExpertDomain::BusinessAnalyst.role_name(), "Business Analyst");
    }

    #[test]
    fn test_roster_lists_all_experts() {
        let roster = ExpertDomain::roster();
        assert_eq!(roster.lines().count(), 12);
        assert!(roster.contains("- legal_expert → laws, contracts, compliance"));
    }

    #[test]
    fn test_decision_serde() {
        let d: ExpertDecision = serde_json::from_str(r#"{"expert": "sales_expert"}"#).unwrap();
        assert_eq!(d.expert, ExpertDomain::Sales);
        assert!(serde_json::from_str::<ExpertDecision>(r#"{"expert": "nobody"}"#).is_err());
    }
}
