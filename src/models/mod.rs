pub mod room;

pub use room::{
    ChatType, ConfirmPasswordRequest, CreateRoomRequest, DuplicateNameQuery, Room, RoomIdQuery,
    RoomSummary,
};
