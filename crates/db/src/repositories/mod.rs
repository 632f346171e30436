pub mod meal_repo;

pub use meal_repo::MealRepo;
