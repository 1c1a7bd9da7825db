//! Projection from drag displacement to visual state.

/// Degrees of tilt per pixel of displacement in the away-from-dismiss mode.
const ROTATION_DEGREES_PER_PIXEL: f32 = 0.05;

/// Which way the current gesture is heading relative to the dismiss edge.
///
/// Re-evaluated whenever the displacement sign flips mid-gesture: swiping
/// toward the dismiss edge translates and fades the overlay in, swiping away
/// tilts the card instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SwipeMode {
    /// No displacement-producing sample yet.
    #[default]
    Undecided,
    TowardDismiss,
    AwayFromDismiss,
}

/// The visual state a host should render for a given displacement.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CardTransform {
    /// Horizontal offset of the card in px.
    pub offset_x: f32,
    /// Tilt around the vertical axis in degrees.
    pub rotation_y: f32,
    /// Opacity of the dismissal overlay label, in [0, 1].
    pub overlay_alpha: f32,
}

/// Maps a displacement to the card's visual state.
///
/// Pure function of its inputs: no hidden state, so projecting the same
/// displacement twice yields the same transform.
pub fn project_transform(
    displacement: f32,
    width: f32,
    mode: SwipeMode,
    triggered: bool,
) -> CardTransform {
    let overlay_alpha = if triggered {
        // Locked on once the dismissal has been triggered.
        1.0
    } else if width > 0.0 {
        (displacement.abs() / width).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let rotation_y = match mode {
        SwipeMode::AwayFromDismiss => displacement * ROTATION_DEGREES_PER_PIXEL,
        SwipeMode::Undecided | SwipeMode::TowardDismiss => 0.0,
    };

    CardTransform {
        offset_x: displacement,
        rotation_y,
        overlay_alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_idempotent() {
        let a = project_transform(-320.0, 1000.0, SwipeMode::TowardDismiss, false);
        let b = project_transform(-320.0, 1000.0, SwipeMode::TowardDismiss, false);
        assert_eq!(a, b);
    }

    #[test]
    fn overlay_follows_displacement_fraction() {
        let t = project_transform(-250.0, 1000.0, SwipeMode::TowardDismiss, false);
        assert!((t.overlay_alpha - 0.25).abs() < 1e-6);
        assert_eq!(t.offset_x, -250.0);
        assert_eq!(t.rotation_y, 0.0);
    }

    #[test]
    fn overlay_clamps_to_one() {
        let t = project_transform(-1500.0, 1000.0, SwipeMode::TowardDismiss, false);
        assert_eq!(t.overlay_alpha, 1.0);
    }

    #[test]
    fn overlay_pins_to_opaque_once_triggered() {
        let t = project_transform(0.0, 1000.0, SwipeMode::Undecided, true);
        assert_eq!(t.overlay_alpha, 1.0);
    }

    #[test]
    fn zero_width_reports_zero_overlay() {
        let t = project_transform(100.0, 0.0, SwipeMode::TowardDismiss, false);
        assert_eq!(t.overlay_alpha, 0.0);
    }

    #[test]
    fn away_mode_tilts_instead_of_fading_extra() {
        let t = project_transform(200.0, 1000.0, SwipeMode::AwayFromDismiss, false);
        assert!((t.rotation_y - 10.0).abs() < 1e-6);
    }
}
