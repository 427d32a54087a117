/*!
    Decoder discard policy.
*/

/**
    Which frames a decoder may drop without fully decoding them.

    Variants are ordered from least to most aggressive, so `a < b` means
    `b` discards at least everything `a` does.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Discard {
    /// Discard nothing
    None,
    /// Discard useless packets like zero-size packets
    #[default]
    Default,
    /// Discard all non-reference frames
    NonRef,
    /// Discard all bidirectionally predicted frames
    Bidir,
    /// Discard all non-intra frames
    NonIntra,
    /// Discard all frames except keyframes
    NonKey,
    /// Discard all frames
    All,
}

impl Discard {
    /**
        Returns true if a frame with the given properties is dropped
        under this policy.
    */
    pub fn drops(self, keyframe: bool, reference: bool) -> bool {
        match self {
            Self::None | Self::Default => false,
            Self::NonRef | Self::Bidir => !reference,
            Self::NonIntra | Self::NonKey => !keyframe,
            Self::All => true,
        }
    }
}
