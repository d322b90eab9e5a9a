// Mirrors the table created by `SqliteStore::initialize`.

diesel::table! {
    players (player_id) {
        player_id -> Integer,
        left_hand -> Integer,
        right_hand -> Integer,
    }
}
