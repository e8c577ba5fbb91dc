//! Generic cooking steps attached to every suggestion.

use super::types::UsedIngredient;

const DEFAULT_MAIN: &str = "main ingredient";
const DEFAULT_OTHERS: &str = "vegetables";

pub fn recipe_steps(menu_title: &str, used: &[UsedIngredient]) -> Vec<String> {
    let main = used.first().map_or(DEFAULT_MAIN, |item| item.name.as_str());
    let others = used.iter().skip(1).map(|item| item.name.as_str()).collect::<Vec<_>>();
    let others_label = if others.is_empty() { DEFAULT_OTHERS.to_string() } else { others.join(", ") };
    let add_step = if others.is_empty() {
        "add your choice of extras".to_string()
    } else {
        format!("add the {others_label}")
    };

    vec![
        format!("Season the {main} lightly with salt and pepper and let it rest for 5 minutes."),
        format!("Cut the {others_label} into bite-sized pieces so they cook evenly."),
        format!("Sear the {main} over medium heat until browned, then {add_step} and toss briefly."),
        "Adjust the seasoning to taste, plate it, and serve with rice or soup.".to_string(),
        format!("After cooking {menu_title}, update the stock so the next suggestions stay accurate."),
    ]
}
