//! Prompt construction. Pure function of the request and the catalog.

use crate::domain::{ClassificationRequest, Prompt, TaxonomyCatalog};

/// Fixed role and output contract for the backend.
fn system_prompt() -> &'static str {
    r#"You are a procurement category specialist. You map purchase-order
descriptions onto a fixed three-level taxonomy: Category (L1),
Sub-Category (L2), Commodity (L3).

## Rules
- Pick exactly one chain from the taxonomy provided by the user.
- Your L2 must be listed under your chosen L1, and your L3 under your chosen L2.
- Base the choice on the description; treat the supplier, when given, only as a hint.
- Copy the labels verbatim from the taxonomy.

## Output Format
You MUST respond with valid JSON only. No markdown, no explanations outside JSON.

{"L1": "<Category>", "L2": "<Sub-Category>", "L3": "<Commodity>"}

Use exactly the keys L1, L2 and L3 and no others."#
}

/// Build the user-facing half of the instruction: the PO details and the
/// permissible taxonomy rendered as an indented tree.
fn user_prompt(request: &ClassificationRequest, catalog: &TaxonomyCatalog) -> String {
    let mut text = String::new();
    text.push_str("Classify the following purchase order.\n\n");
    text.push_str(&format!("Description: {}\n", request.description()));
    if let Some(supplier) = request.supplier() {
        text.push_str(&format!("Supplier: {}\n", supplier));
    }
    text.push_str("\n## Taxonomy\n");
    text.push_str(&render_catalog(catalog));
    text
}

/// Render the catalog as an indented tree, one label per line.
fn render_catalog(catalog: &TaxonomyCatalog) -> String {
    let mut tree = String::new();
    for category in catalog.categories() {
        tree.push_str(&category.name);
        tree.push('\n');
        for sub in &category.sub_categories {
            tree.push_str("  ");
            tree.push_str(&sub.name);
            tree.push('\n');
            for commodity in &sub.commodities {
                tree.push_str("    ");
                tree.push_str(commodity);
                tree.push('\n');
            }
        }
    }
    tree
}

/// Turn a request plus the catalog snapshot into the model-facing
/// instruction. No side effects.
pub fn build_prompt(request: &ClassificationRequest, catalog: &TaxonomyCatalog) -> Prompt {
    Prompt {
        system: system_prompt().to_string(),
        user: user_prompt(request, catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TaxonomyCatalog {
        TaxonomyCatalog::embedded().unwrap()
    }

    #[test]
    fn test_prompt_embeds_description() {
        let request =
            ClassificationRequest::new("Annual subscription for cloud services", None).unwrap();
        let prompt = build_prompt(&request, &catalog());
        assert!(
            prompt
                .user
                .contains("Description: Annual subscription for cloud services")
        );
        assert!(!prompt.user.contains("Supplier:"));
    }

    #[test]
    fn test_prompt_embeds_supplier_when_present() {
        let request =
            ClassificationRequest::new("Annual subscription", Some("Microsoft")).unwrap();
        let prompt = build_prompt(&request, &catalog());
        assert!(prompt.user.contains("Supplier: Microsoft"));
    }

    #[test]
    fn test_prompt_enumerates_all_categories() {
        let cat = catalog();
        let request = ClassificationRequest::new("office chairs", None).unwrap();
        let prompt = build_prompt(&request, &cat);
        for category in cat.categories() {
            assert!(prompt.user.contains(&category.name));
        }
    }

    #[test]
    fn test_system_prompt_states_key_contract() {
        let request = ClassificationRequest::new("office chairs", None).unwrap();
        let prompt = build_prompt(&request, &catalog());
        assert!(prompt.system.contains("\"L1\""));
        assert!(prompt.system.contains("valid JSON only"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = ClassificationRequest::new("office chairs", Some("IKEA")).unwrap();
        let cat = catalog();
        assert_eq!(build_prompt(&request, &cat), build_prompt(&request, &cat));
    }
}
