pub mod calendar;
pub mod config;
pub mod domain;
pub mod errors;
pub mod portion;
pub mod suggestions;

pub use calendar::{Calendar, FixedCalendar, SystemCalendar};
pub use domain::family::{
    Appetite, FamilyMember, FamilyMemberDraft, FamilyMemberId, LifeStage, PortionProfile,
};
pub use domain::ingredient::{
    BulkQuantityUpdate, Ingredient, IngredientDraft, IngredientId, QuantityUpdate,
};
pub use domain::sale::{Sale, SaleDraft, SaleId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use portion::household_portion_scale;
pub use suggestions::{
    ConsumptionLine, ConsumptionPlan, MenuSuggestion, SaleRecommendation, SuggestionEngine,
    SuggestionRequest, UsedIngredient,
};
