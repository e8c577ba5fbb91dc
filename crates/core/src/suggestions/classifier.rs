//! Food-group classification rules.
//!
//! Each group is a rule pairing category labels with name tokens. A category matches when
//! it contains any label; a name matches when its lowercase form contains any token. Groups
//! overlap freely.

use crate::domain::ingredient::Ingredient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodGroup {
    Protein,
    Vegetable,
    Staple,
    Dairy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierRule {
    pub category_labels: &'static [&'static str],
    pub name_tokens: &'static [&'static str],
}

pub const PROTEIN_RULE: ClassifierRule = ClassifierRule {
    category_labels: &[
        "肉", "魚", "卵", "豆", "肉類", "魚介", "meat", "fish", "egg", "bean", "seafood",
    ],
    name_tokens: &["chicken", "pork", "beef", "fish", "egg", "tofu"],
};

pub const VEGETABLE_RULE: ClassifierRule = ClassifierRule {
    category_labels: &["野菜", "根菜", "きのこ", "vegetable", "root vegetable", "mushroom"],
    name_tokens: &["lettuce", "spinach", "carrot", "broccoli", "cabbage", "onion"],
};

pub const STAPLE_RULE: ClassifierRule = ClassifierRule {
    category_labels: &["主食", "穀類", "staple", "grain"],
    name_tokens: &[
        "rice", "ご飯", "パン", "麺", "うどん", "パスタ", "bread", "noodle", "pasta", "udon",
    ],
};

pub const DAIRY_RULE: ClassifierRule =
    ClassifierRule { category_labels: &["乳", "dairy"], name_tokens: &[] };

impl ClassifierRule {
    pub fn matches_category(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.category_labels.iter().any(|label| category.contains(label))
    }

    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.name_tokens.iter().any(|token| name.contains(token))
    }

    pub fn matches(&self, ingredient: &Ingredient) -> bool {
        self.matches_category(ingredient.category_or_empty()) || self.matches_name(&ingredient.name)
    }
}

impl FoodGroup {
    pub fn rule(&self) -> &'static ClassifierRule {
        match self {
            FoodGroup::Protein => &PROTEIN_RULE,
            FoodGroup::Vegetable => &VEGETABLE_RULE,
            FoodGroup::Staple => &STAPLE_RULE,
            FoodGroup::Dairy => &DAIRY_RULE,
        }
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.rule().matches(ingredient)
    }
}

pub fn is_protein(ingredient: &Ingredient) -> bool {
    FoodGroup::Protein.contains(ingredient)
}

pub fn is_vegetable(ingredient: &Ingredient) -> bool {
    FoodGroup::Vegetable.contains(ingredient)
}

pub fn is_staple(ingredient: &Ingredient) -> bool {
    FoodGroup::Staple.contains(ingredient)
}

pub fn is_dairy(ingredient: &Ingredient) -> bool {
    FoodGroup::Dairy.contains(ingredient)
}

/// Group subsets of an urgency-sorted stock list, preserving order.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedStock<'a> {
    pub proteins: Vec<&'a Ingredient>,
    pub vegetables: Vec<&'a Ingredient>,
    pub staples: Vec<&'a Ingredient>,
    pub dairy: Vec<&'a Ingredient>,
}

impl<'a> ClassifiedStock<'a> {
    pub fn from_sorted(items: &'a [Ingredient]) -> Self {
        let pick = |group: FoodGroup| -> Vec<&'a Ingredient> {
            items.iter().filter(|item| group.contains(item)).collect()
        };

        Self {
            proteins: pick(FoodGroup::Protein),
            vegetables: pick(FoodGroup::Vegetable),
            staples: pick(FoodGroup::Staple),
            dairy: pick(FoodGroup::Dairy),
        }
    }
}
