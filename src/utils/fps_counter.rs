use std::time::{Duration, Instant};

/// Length of one averaging window.
const WINDOW: Duration = Duration::from_secs(1);

/// Frame rate averaged over fixed one-second windows, shown in the title bar.
#[derive(Debug)]
pub struct FpsCounter {
    last_frame: Instant,
    window_frames: u32,
    window_time: Duration,
    /// Average of the last completed window.
    pub current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            window_frames: 0,
            window_time: Duration::ZERO,
            current_fps: 0.0,
        }
    }

    /// Counts a frame ending now.
    pub fn update(&mut self) -> Option<f32> {
        let now = Instant::now();
        let frame_time = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.tick(frame_time)
    }

    /// Counts a frame of `frame_time`; returns the average when a window closes.
    pub fn tick(&mut self, frame_time: Duration) -> Option<f32> {
        self.window_frames += 1;
        self.window_time += frame_time;
        if self.window_time < WINDOW {
            return None;
        }

        self.current_fps = self.window_frames as f32 / self.window_time.as_secs_f32();
        self.window_frames = 0;
        self.window_time = Duration::ZERO;
        Some(self.current_fps)
    }
}
