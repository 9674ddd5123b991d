use dragkit_geometry::Point;

/// Lifecycle state reported with every gesture event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    #[default]
    Undetermined,
    Began,
    Active,
    Ended,
    Failed,
    Cancelled,
}

impl GestureState {
    /// Ended, failed or cancelled.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GestureState::Ended | GestureState::Failed | GestureState::Cancelled
        )
    }
}

/// One pan gesture sample.
///
/// `x`/`y` is the pointer position, `translation_*` the travel since the
/// gesture began and `velocity_*` the release velocity in pixels per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub state: GestureState,
    pub x: f32,
    pub y: f32,
    pub translation_x: f32,
    pub translation_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl GestureEvent {
    pub fn begin(x: f32, y: f32) -> Self {
        Self {
            state: GestureState::Began,
            x,
            y,
            translation_x: 0.0,
            translation_y: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
        }
    }

    pub fn update(translation_x: f32, translation_y: f32) -> Self {
        Self {
            state: GestureState::Active,
            translation_x,
            translation_y,
            ..Self::begin(0.0, 0.0)
        }
    }

    pub fn finalize(state: GestureState, velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            state,
            velocity_x,
            velocity_y,
            ..Self::begin(0.0, 0.0)
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_translation(mut self, translation_x: f32, translation_y: f32) -> Self {
        self.translation_x = translation_x;
        self.translation_y = translation_y;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.velocity_x, self.velocity_y)
    }
}

/// Gesture callback together with the engine entry point it targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureInput {
    Begin(GestureEvent),
    Update(GestureEvent),
    Finalize(GestureEvent),
}

impl GestureInput {
    pub fn event(&self) -> &GestureEvent {
        match self {
            GestureInput::Begin(event)
            | GestureInput::Update(event)
            | GestureInput::Finalize(event) => event,
        }
    }
}
