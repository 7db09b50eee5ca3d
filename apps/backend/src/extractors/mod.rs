pub mod game_id;
pub mod validated_json;

pub use game_id::GameIdQuery;
pub use validated_json::ValidatedJson;
