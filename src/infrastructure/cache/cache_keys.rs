use uuid::Uuid;

pub fn settlement_key(room_id: Uuid) -> String {
    format!("settlement:{}", room_id)
}
