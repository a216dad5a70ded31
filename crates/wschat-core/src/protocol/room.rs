//! Room naming.

/// Reserved name of the room joined when no room is specified.
pub const GLOBAL_ROOM_NAME: &str = "Global";

/// An empty name and the reserved name both denote the default room.
pub fn is_default_room(name: &str) -> bool {
    name.is_empty() || name == GLOBAL_ROOM_NAME
}

/// Canonical form: the default room is always spelled [`GLOBAL_ROOM_NAME`].
pub fn canonical_room_name(name: &str) -> &str {
    let name = name.trim();
    if is_default_room(name) {
        GLOBAL_ROOM_NAME
    } else {
        name
    }
}
