//! # Roll Holder CAM Tools
//!
//! Parametric geometry for a wall mounted roll holder cut from sheet material,
//! and the writers turning it into cut files.
//!
//! ## Pipeline
//!
//! - **Roll Holder Maker**: resolves the holder dimensions, builds the panel
//!   outlines and joint holes, and lays them out on one sheet
//! - **Renderer**: turtle backend executing the sheet's draw commands into paths
//! - **G-code / SVG / DXF**: cut file output of the rendered sheet

pub mod dxf_export;
pub mod error;
pub mod finger_joint;
pub mod gcode;
pub mod renderer;
pub mod roll_holder;
pub mod svg_export;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use finger_joint::FingerJointSettings;
pub use gcode::{GcodeWriter, LaserSettings};
pub use renderer::{render, RenderedPanel, RenderedSheet, Turtle, DEFAULT_TOLERANCE};
pub use roll_holder::{
    BackPlateLayout, DrawCommand, HeightPolicy, PanelKind, ResolvedMeasurements,
    RollHolderMaker, RollHolderParameters, Sheet, SheetComposer,
};
