//=========================================================================
// Window Placement
//=========================================================================

use log::debug;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

/// Moves `window` to the center of its current (or primary) monitor.
/// Platforms without window positioning (Wayland) leave it in place.
pub(crate) fn center_on_monitor(window: &Window) {
    let Some(monitor) = window.current_monitor().or_else(|| window.primary_monitor()) else {
        debug!(target: "platform", "No monitor reported, window not centered");
        return;
    };

    let position = centered_position(monitor.position(), monitor.size(), window.outer_size());
    window.set_outer_position(position);
}

/// Top-left corner that centers `window` inside the monitor rectangle.
pub(crate) fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (i64::from(monitor) - i64::from(window)) / 2;

    let x = i64::from(monitor_origin.x) + offset(monitor_size.width, window.width);
    let y = i64::from(monitor_origin.y) + offset(monitor_size.height, window.height);

    PhysicalPosition::new(clamp_i32(x), clamp_i32(y))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_on_primary_monitor() {
        let position = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(position, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn respects_monitor_origin() {
        let position = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(2560, 1440),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(position, PhysicalPosition::new(1920 + 880, -200 + 420));
    }

    #[test]
    fn oversized_window_goes_negative() {
        let position = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(800, 600),
            PhysicalSize::new(1000, 700),
        );
        assert_eq!(position, PhysicalPosition::new(-100, -50));
    }
}
