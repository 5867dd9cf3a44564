use crate::canvas::{Color, Stroke};
use crate::notify::{ChangeSource, Observable};
use std::rc::Rc;

/// Whether an overlay is drawn beneath or above the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    Background,
    #[default]
    Foreground,
}

/// A highlighted value or interval on a domain or range axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    Value {
        value: f64,
        stroke: Stroke,
        label: Option<String>,
    },
    Interval {
        start: f64,
        end: f64,
        fill: Color,
        outline: Option<Stroke>,
        label: Option<String>,
    },
}

pub type MarkerHandle = Rc<Observable<Marker>>;

impl Marker {
    pub fn value(value: f64, stroke: Stroke) -> Self {
        Self::Value {
            value,
            stroke,
            label: None,
        }
    }

    pub fn interval(start: f64, end: f64, fill: Color) -> Self {
        Self::Interval {
            start,
            end,
            fill,
            outline: None,
            label: None,
        }
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Value { label, .. } | Self::Interval { label, .. } => *label = Some(text.into()),
        }
        self
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Value { label, .. } | Self::Interval { label, .. } => label.as_deref(),
        }
    }

    pub fn shared(self) -> MarkerHandle {
        Observable::new(ChangeSource::Marker, self)
    }
}

/// Free-form decoration positioned in data coordinates: `x` is along the
/// domain axis and `y` along the range axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        font_size: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Box {
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
        fill: Option<Color>,
        outline: Option<Stroke>,
    },
}

pub type AnnotationHandle = Rc<Observable<Annotation>>;

impl Annotation {
    pub fn shared(self) -> AnnotationHandle {
        Observable::new(ChangeSource::Annotation, self)
    }
}
