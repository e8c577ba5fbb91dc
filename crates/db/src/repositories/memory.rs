use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use larder_core::domain::family::{FamilyMember, FamilyMemberId};
use larder_core::domain::ingredient::{sort_by_urgency, Ingredient, IngredientId, QuantityUpdate};
use larder_core::domain::sale::{Sale, SaleId};

use super::{FamilyMemberRepository, IngredientRepository, RepositoryError, SaleRepository};

#[derive(Default)]
pub struct InMemoryIngredientRepository {
    ingredients: RwLock<HashMap<String, Ingredient>>,
}

#[async_trait::async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn list(&self) -> Result<Vec<Ingredient>, RepositoryError> {
        let ingredients = self.ingredients.read().await;
        let mut items: Vec<Ingredient> = ingredients.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        sort_by_urgency(&mut items);
        Ok(items)
    }

    async fn find_by_id(&self, id: &IngredientId) -> Result<Option<Ingredient>, RepositoryError> {
        let ingredients = self.ingredients.read().await;
        Ok(ingredients.get(&id.0).cloned())
    }

    async fn save(&self, ingredient: Ingredient) -> Result<(), RepositoryError> {
        let mut ingredients = self.ingredients.write().await;
        ingredients.insert(ingredient.id.0.clone(), ingredient);
        Ok(())
    }

    async fn delete(&self, id: &IngredientId) -> Result<bool, RepositoryError> {
        let mut ingredients = self.ingredients.write().await;
        Ok(ingredients.remove(&id.0).is_some())
    }

    async fn bulk_update_quantities(
        &self,
        updates: &[QuantityUpdate],
    ) -> Result<Vec<Ingredient>, RepositoryError> {
        let now = Utc::now();
        let mut ingredients = self.ingredients.write().await;

        let updated: Vec<Ingredient> = updates
            .iter()
            .filter_map(|update| {
                let ingredient = ingredients.get_mut(&update.id.0)?;
                ingredient.quantity = update.quantity;
                ingredient.updated_at = Some(now);
                Some(ingredient.clone())
            })
            .collect();

        tracing::info!(
            event_name = "inventory.bulk_update.applied",
            requested = updates.len(),
            applied = updated.len(),
            "ingredient quantities updated"
        );
        Ok(updated)
    }
}

#[derive(Default)]
pub struct InMemorySaleRepository {
    sales: RwLock<HashMap<String, Sale>>,
}

#[async_trait::async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn list(&self) -> Result<Vec<Sale>, RepositoryError> {
        let sales = self.sales.read().await;
        let mut items: Vec<Sale> = sales.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.0.cmp(&b.id.0)));
        Ok(items)
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, RepositoryError> {
        let sales = self.sales.read().await;
        Ok(sales.get(&id.0).cloned())
    }

    async fn save(&self, sale: Sale) -> Result<(), RepositoryError> {
        let mut sales = self.sales.write().await;
        sales.insert(sale.id.0.clone(), sale);
        Ok(())
    }

    async fn delete(&self, id: &SaleId) -> Result<bool, RepositoryError> {
        let mut sales = self.sales.write().await;
        Ok(sales.remove(&id.0).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryFamilyMemberRepository {
    members: RwLock<HashMap<String, FamilyMember>>,
}

#[async_trait::async_trait]
impl FamilyMemberRepository for InMemoryFamilyMemberRepository {
    async fn list(&self) -> Result<Vec<FamilyMember>, RepositoryError> {
        let members = self.members.read().await;
        let mut items: Vec<FamilyMember> = members.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn find_by_id(
        &self,
        id: &FamilyMemberId,
    ) -> Result<Option<FamilyMember>, RepositoryError> {
        let members = self.members.read().await;
        Ok(members.get(&id.0).cloned())
    }

    async fn save(&self, member: FamilyMember) -> Result<(), RepositoryError> {
        let mut members = self.members.write().await;
        members.insert(member.id.0.clone(), member);
        Ok(())
    }

    async fn delete(&self, id: &FamilyMemberId) -> Result<bool, RepositoryError> {
        let mut members = self.members.write().await;
        Ok(members.remove(&id.0).is_some())
    }
}
