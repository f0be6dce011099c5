use bytemuck::{Pod, Zeroable};

pub const PRESENT_SOURCE: &str = include_str!("present.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct PresentParams {
    pub background: [f32; 4],
}
