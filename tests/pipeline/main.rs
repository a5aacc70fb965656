//! End-to-end tests for `zerog-rs`: the frame-spec compiler feeding
//! playback, the ELANIC codec round trip, and the virtual clock driving it
//! all through the public facade.

mod codec;
mod playback;
mod timing;
