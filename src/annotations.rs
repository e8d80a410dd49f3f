use crate::segments::Point2D;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Flags that annotate the targets a drawing session emits, so a
    /// renderer can decide pen state without reaching into the state
    /// machine.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct TargetFlags: u32 {
        /// The arm is travelling towards the first point of a segment with
        /// the pen up.
        const MOVE =            0b0000_0001;

        /// The arm is tracing a stroke with the pen down.
        const TRACE =           0b0000_0010;

        /// Target is the first point of its segment.
        const SEGMENT_START =   0b0000_0100;

        /// Target is the last point of its segment; after reaching it the
        /// pen lifts.
        const SEGMENT_END =     0b0000_1000;
    }
}

/// A target point of the drawing session together with how the arm is
/// supposed to approach it.
#[derive(Clone, Copy, PartialEq)]
pub struct AnnotatedTarget {
    pub point: Point2D,
    pub flags: TargetFlags,
}

fn flag_representation(flags: &TargetFlags) -> String {
    const FLAG_MAP: &[(TargetFlags, &str)] = &[
        (TargetFlags::MOVE, "MOVE"),
        (TargetFlags::TRACE, "TRACE"),
        (TargetFlags::SEGMENT_START, "SEGMENT_START"),
        (TargetFlags::SEGMENT_END, "SEGMENT_END"),
    ];

    FLAG_MAP
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl fmt::Debug for TargetFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", flag_representation(self))
    }
}

impl fmt::Debug for AnnotatedTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: [{:.3}, {:.3}]",
            flag_representation(&self.flags),
            self.point.x,
            self.point.y
        )
    }
}
