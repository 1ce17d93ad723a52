pub mod entity_id;
