pub mod award_points_handler;
pub mod steering;
pub mod take_damage;
