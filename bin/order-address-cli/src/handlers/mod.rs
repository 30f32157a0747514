pub(crate) mod address;
pub(crate) mod seed;
pub(crate) mod verify;
