use super::registry::Registry;
use crate::store::model::RegistryEntry;
use serde::Serialize;

/// Distinct asset types in the registry, sorted.
pub fn asset_types(registry: &Registry) -> Vec<String> {
    let mut types: Vec<String> = registry
        .entries()
        .iter()
        .map(|e| e.asset_type.clone())
        .collect();
    types.sort();
    types.dedup();
    types
}

/// Registry rows of one asset type whose name contains `query`
/// (case-insensitive). An empty query keeps every row of the type.
pub fn search<'a>(registry: &'a Registry, asset_type: &str, query: &str) -> Vec<&'a RegistryEntry> {
    let needle = query.to_lowercase();
    registry
        .entries()
        .iter()
        .filter(|e| e.asset_type == asset_type)
        .filter(|e| needle.is_empty() || e.asset_name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerCard {
    pub asset_type: String,
    pub asset_name: String,
    pub owner_team: String,
    pub contact_channel: String,
    pub manager_email: String,
    pub runbook_link: String,
}

impl From<&RegistryEntry> for OwnerCard {
    fn from(e: &RegistryEntry) -> Self {
        Self {
            asset_type: e.asset_type.clone(),
            asset_name: e.asset_name.clone(),
            owner_team: e.owner_team.clone(),
            contact_channel: e.contact_channel.clone(),
            manager_email: e.manager_email.clone(),
            runbook_link: e.runbook_link.clone(),
        }
    }
}

/// Owner card for the first listed row named `asset_name`.
pub fn owner_card(listing: &[&RegistryEntry], asset_name: &str) -> Option<OwnerCard> {
    listing
        .iter()
        .find(|e| e.asset_name == asset_name)
        .map(|e| OwnerCard::from(*e))
}

pub fn render_directory_markdown(asset_type: &str, listing: &[&RegistryEntry]) -> String {
    let mut out = Vec::new();
    out.push(format!("# Ownership: {}", asset_type));
    out.push("".to_string());
    if listing.is_empty() {
        out.push("_No matching assets._".to_string());
        out.push("".to_string());
        return out.join("\n");
    }
    out.push("| Asset | Owner team | Channel | Manager | Runbook |".to_string());
    out.push("|---|---|---|---|---|".to_string());
    for e in listing {
        out.push(format!(
            "| {} | {} | {} | {} | {} |",
            e.asset_name, e.owner_team, e.contact_channel, e.manager_email, e.runbook_link
        ));
    }
    out.push("".to_string());
    out.join("\n")
}

pub fn render_owner_card(card: &OwnerCard) -> String {
    [
        format!("## Owner card: {} {}", card.asset_type, card.asset_name),
        "".to_string(),
        format!("- **Owner team:** {}", card.owner_team),
        format!("- **Channel:** {}", card.contact_channel),
        format!("- **Manager:** {}", card.manager_email),
        format!("- **Runbook:** {}", card.runbook_link),
        "".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(asset_type: &str, asset_name: &str) -> RegistryEntry {
        RegistryEntry {
            asset_type: asset_type.into(),
            asset_name: asset_name.into(),
            owner_team: "Team".into(),
            contact_channel: "#team".into(),
            manager_email: "mgr@example.com".into(),
            runbook_link: "https://runbooks.example.com".into(),
        }
    }

    fn registry() -> Registry {
        Registry::from_entries(vec![
            entry("Service", "checkout-api"),
            entry("Database", "orders-db"),
            entry("Service", "Search-API"),
            entry("Database", "users-db"),
        ])
    }

    #[test]
    fn asset_types_are_sorted_and_unique() {
        assert_eq!(asset_types(&registry()), vec!["Database", "Service"]);
    }

    #[test]
    fn search_filters_by_type_then_name_case_insensitively() {
        let reg = registry();
        let all = search(&reg, "Service", "");
        assert_eq!(all.len(), 2);
        let hits: Vec<&str> = search(&reg, "Service", "api")
            .iter()
            .map(|e| e.asset_name.as_str())
            .collect();
        assert_eq!(hits, vec!["checkout-api", "Search-API"]);
        assert!(search(&reg, "Database", "api").is_empty());
    }

    #[test]
    fn owner_card_comes_from_listing() {
        let reg = registry();
        let listing = search(&reg, "Database", "db");
        let card = owner_card(&listing, "users-db").unwrap();
        assert_eq!(card.manager_email, "mgr@example.com");
        assert!(owner_card(&listing, "checkout-api").is_none());
        assert!(render_owner_card(&card).contains("**Runbook:** https://runbooks.example.com"));
    }

    #[test]
    fn empty_listing_renders_placeholder() {
        let md = render_directory_markdown("Queue", &[]);
        assert!(md.contains("_No matching assets._"));
    }
}
