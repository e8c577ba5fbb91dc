use larder_core::{Calendar, SystemCalendar};
use larder_db::repositories::{
    SqlFamilyMemberRepository, SqlIngredientRepository, SqlSaleRepository,
};
use larder_db::{connect_from_config, migrations, DemoHousehold, SeedSummary};

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let today = SystemCalendar.today();
    let result = runtime.block_on(async {
        let pool = connect_from_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let ingredients = SqlIngredientRepository::new(pool.clone());
        let sales = SqlSaleRepository::new(pool.clone());
        let family = SqlFamilyMemberRepository::new(pool.clone());
        let seeded = DemoHousehold::for_date(today)
            .seed_if_empty(&ingredients, &sales, &family)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 6u8))?;

        pool.close().await;
        Ok::<Option<SeedSummary>, (&'static str, String, u8)>(seeded)
    });

    match result {
        Ok(seeded) => CommandResult::success("seed", seed_message(seeded)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(seeded: Option<SeedSummary>) -> String {
    match seeded {
        Some(summary) => format!(
            "seeded demo household: {} ingredients, {} sales, {} family members",
            summary.ingredients, summary.sales, summary.family_members
        ),
        None => "store already holds data; demo household not seeded".to_string(),
    }
}
