//! One-line entry: `<amount> <title words...> [#category]`.
//!
//! Only the line is split here; the amount text, title and date still go
//! through [`engine::Ledger::add`] for validation.

use engine::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddParsed {
    pub amount: String,
    pub title: String,
    pub category: Category,
}

pub fn parse(input: &str) -> Result<QuickAddParsed, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Enter an amount and a title.".to_string());
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let amount = parts.next().unwrap_or("").trim();
    if amount.is_empty() || amount.starts_with('#') {
        return Err("Missing amount.".to_string());
    }
    let rest = parts.next().unwrap_or("").trim();

    let (category, title) = parse_tag(rest)?;

    Ok(QuickAddParsed {
        amount: amount.to_string(),
        title,
        category: category.unwrap_or_default(),
    })
}

fn parse_tag(rest: &str) -> Result<(Option<Category>, String), String> {
    let mut tag: Option<Category> = None;
    let mut kept: Vec<&str> = Vec::new();

    for token in rest.split_whitespace() {
        if let Some(name) = token.strip_prefix('#') {
            if name.is_empty() {
                kept.push(token);
                continue;
            }
            if tag.is_some() {
                return Err("Too many tags: at most 1.".to_string());
            }
            tag = Some(
                name.parse::<Category>()
                    .map_err(|err| format!("{err}; use one of {}", category_names()))?,
            );
        } else {
            kept.push(token);
        }
    }

    Ok((tag, kept.join(" ")))
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("#{}", c.label().to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
