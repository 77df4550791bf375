//! Category display formatting

use crate::models::Category;

pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    for category in categories {
        let marker = if category.is_custom { " (custom)" } else { "" };
        output.push_str(&format!("{} {}{}\n", category.icon, category.name, marker));
    }
    output
}
