//! Category tree formatting

use crate::models::{BudgetScope, CategoryTree, PermanentBudgets, SubcategoryKey};

/// Format a category tree, with permanent budget amounts when given
pub fn format_category_tree(tree: &CategoryTree, scope: BudgetScope, budgets: Option<&PermanentBudgets>) -> String {
    if tree.is_empty() {
        return format!(
            "No {} categories found.\n\nAdd one with 'hearth category add{}'.\n",
            scope,
            if scope == BudgetScope::Temporary { " --temporary" } else { "" }
        );
    }

    let mut output = String::new();
    let categories = tree.categories();

    for (i, category) in categories.iter().enumerate() {
        output.push_str(&format!("{}\n", category));

        let subcategories = tree.subcategories(category);
        if subcategories.is_empty() {
            output.push_str("  (no subcategories)\n");
        }
        for (j, subcategory) in subcategories.iter().enumerate() {
            let prefix = if j == subcategories.len() - 1 { "└── " } else { "├── " };
            let amount = budgets
                .and_then(|b| b.get(&SubcategoryKey::new(*category, *subcategory)))
                .map(|m| format!(" ({})", m))
                .unwrap_or_default();
            output.push_str(&format!("  {}{}{}\n", prefix, subcategory, amount));
        }

        if i < categories.len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_tree() {
        let mut tree = CategoryTree::new();
        tree.add_subcategory(&SubcategoryKey::new("Hogar", "Supermercado"));
        tree.add_subcategory(&SubcategoryKey::new("Hogar", "Luz"));
        tree.add_category("Ocio");
        let mut budgets = PermanentBudgets::new();
        budgets.set(&SubcategoryKey::new("Hogar", "Luz"), Money::from_units(30000));

        let formatted = format_category_tree(&tree, BudgetScope::Permanent, Some(&budgets));
        assert!(formatted.contains("├── Luz (30000)"));
        assert!(formatted.contains("└── Supermercado\n"));
        assert!(formatted.contains("(no subcategories)"));
    }

    #[test]
    fn test_empty_tree() {
        let formatted = format_category_tree(&CategoryTree::new(), BudgetScope::Temporary, None);
        assert!(formatted.contains("--temporary"));
    }
}
