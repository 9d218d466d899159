//! Text format: the codec plus its trace hook.

pub mod codec;
pub mod mock;
pub mod trace;

pub use codec::{
    check_entry_name, check_group_name, check_string_value, decode_config, encode_config,
    EncodeError, FormatError,
};
pub use trace::{CodecTrace, SilentTrace, TracingTrace};
