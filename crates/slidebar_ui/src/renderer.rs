//! Host-side presentation callbacks.
//!
//! The scrollbar never touches the visual structure directly. It pushes handle
//! length, handle position, content scroll position, and hover/drag feedback
//! through [`ScrollbarRenderer`], which the host implements.

use std::fmt;

use crate::event::PointerTarget;

/// Callbacks the host implements to present the scrollbar.
pub trait ScrollbarRenderer {
    /// Apply the handle length
    fn set_handle_length(&mut self, length: f32);

    /// Apply the handle top within the track
    fn set_handle_position(&mut self, offset: f32);

    /// Scroll the content viewport
    fn set_content_scroll_position(&mut self, offset: f32);

    /// Toggle hover feedback on a scrollbar part
    fn set_hover_visual(&mut self, target: PointerTarget, hovered: bool);

    /// Toggle drag feedback on the handle
    fn set_drag_visual(&mut self, _dragging: bool) {}
}

/// A renderer call, as recorded by [`CommandBuffer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    HandleLength(f32),
    HandlePosition(f32),
    ContentScroll(f32),
    Hover { target: PointerTarget, hovered: bool },
    Drag(bool),
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCommand::HandleLength(length) => write!(f, "handle-length {length:.2}"),
            RenderCommand::HandlePosition(offset) => write!(f, "handle-position {offset:.2}"),
            RenderCommand::ContentScroll(offset) => write!(f, "content-scroll {offset:.2}"),
            RenderCommand::Hover { target, hovered } => {
                write!(f, "hover {target:?} {}", if *hovered { "on" } else { "off" })
            }
            RenderCommand::Drag(dragging) => {
                write!(f, "drag {}", if *dragging { "on" } else { "off" })
            }
        }
    }
}

/// Renderer that records every call in order.
///
/// Useful for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the buffer empty
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Most recent handle position, if any was sent
    pub fn last_handle_position(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|command| match command {
            RenderCommand::HandlePosition(offset) => Some(*offset),
            _ => None,
        })
    }

    /// Most recent content scroll position, if any was sent
    pub fn last_content_scroll(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|command| match command {
            RenderCommand::ContentScroll(offset) => Some(*offset),
            _ => None,
        })
    }
}

impl ScrollbarRenderer for CommandBuffer {
    fn set_handle_length(&mut self, length: f32) {
        self.commands.push(RenderCommand::HandleLength(length));
    }

    fn set_handle_position(&mut self, offset: f32) {
        self.commands.push(RenderCommand::HandlePosition(offset));
    }

    fn set_content_scroll_position(&mut self, offset: f32) {
        self.commands.push(RenderCommand::ContentScroll(offset));
    }

    fn set_hover_visual(&mut self, target: PointerTarget, hovered: bool) {
        self.commands.push(RenderCommand::Hover { target, hovered });
    }

    fn set_drag_visual(&mut self, dragging: bool) {
        self.commands.push(RenderCommand::Drag(dragging));
    }
}
