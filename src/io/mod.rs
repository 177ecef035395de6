// Purpose - reading the source recording and writing rendered stems

pub mod resample;
pub mod wav;

pub use resample::resample;
pub use wav::{downmix, read_mono, write_pcm16, write_stems};
