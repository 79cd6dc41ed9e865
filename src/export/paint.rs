//! Draw commands produced by the page layout.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text
//! positions name the baseline start of the line.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        text: String,
    },
    /// Draw the decoded image with index `image` into `rect`
    Image { image: usize, rect: MmRect },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCommands {
    pub commands: Vec<DrawCommand>,
}

impl PageCommands {
    pub fn image_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { image, .. } => Some(*image),
            _ => None,
        })
    }
}
