/// Independent per-axis clamp to the open interior of the room; the margin
/// keeps the result strictly inside so the player can never touch a wall.
fn clamp_to_room(position: Vec2, room: &RoomRect, margin: f32) -> Vec2 {
    Vec2 {
        x: position.x.clamp(room.min.x + margin, room.max.x - margin),
        y: position.y.clamp(room.min.y + margin, room.max.y - margin),
    }
}

/// Yaw that points `from` toward `to`, in the forward = (sin yaw, cos yaw)
/// convention.
fn yaw_facing(from: Vec2, to: Vec2) -> f32 {
    let delta = to.minus(from);
    delta.x.atan2(delta.y)
}
