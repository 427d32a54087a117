/*!
    Seek flags.
*/

use bitflags::bitflags;

bitflags! {
    /**
        Flags controlling a seek.

        The lower bits map one-to-one onto the container's seek flags.
        `NO_COARSE` and `NO_PRECISE` switch off one of the two seek phases.
    */
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SeekFlags: u32 {
        /// Seek to the closest position at or before the target
        const BACKWARD = 1;
        /// The target is a byte offset
        const BYTE = 2;
        /// Allow landing on non-keyframes
        const ANY = 4;
        /// The target is a frame number
        const FRAME = 8;
        /// Skip the container-level seek
        const NO_COARSE = 1 << 30;
        /// Skip decoding forward to the exact target
        const NO_PRECISE = 1 << 31;
    }
}

impl SeekFlags {
    /**
        The subset of flags understood by the container.
    */
    pub const fn container_flags(self) -> Self {
        self.difference(Self::NO_COARSE.union(Self::NO_PRECISE))
    }

    /**
        Returns true if the container-level seek runs.
    */
    pub const fn coarse(self) -> bool {
        !self.contains(Self::NO_COARSE)
    }

    /**
        Returns true if the decoder steps forward to the exact target.
    */
    pub const fn precise(self) -> bool {
        !self.contains(Self::NO_PRECISE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_flags_strip_phase_bits() {
        let flags = SeekFlags::ANY | SeekFlags::NO_PRECISE | SeekFlags::NO_COARSE;
        assert_eq!(flags.container_flags(), SeekFlags::ANY);
        assert_eq!(flags.container_flags().bits(), 4);
    }

    #[test]
    fn phases() {
        let flags = SeekFlags::empty();
        assert!(flags.coarse());
        assert!(flags.precise());

        let flags = SeekFlags::NO_COARSE;
        assert!(!flags.coarse());
        assert!(flags.precise());

        let flags = SeekFlags::BACKWARD | SeekFlags::NO_PRECISE;
        assert!(flags.coarse());
        assert!(!flags.precise());
    }
}
