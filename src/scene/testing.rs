//! Test doubles for the GPU-facing seams of the scene.

use std::{cell::RefCell, collections::HashSet, num::NonZero, rc::Rc};

use crate::{
    abs::{TextureDevice, TextureId, TextureImage, UniformSink, UniformValue},
    error::TextureError,
    render::shapes::{MeshLibrary, Primitive},
};

/// Something the scene did, in the order it did it.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Uniform(String, UniformValue),
    Draw(Primitive),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct RecordingSink {
    pub log: EventLog,
}

impl RecordingSink {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }

    /// The last value pushed under `name`, if any.
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.log.borrow().iter().rev().find_map(|event| match event {
            Event::Uniform(n, value) if n == name => Some(*value),
            _ => None,
        })
    }
}

impl UniformSink for RecordingSink {
    fn set_uniform_value(&self, name: &str, value: UniformValue) {
        self.log
            .borrow_mut()
            .push(Event::Uniform(name.to_string(), value));
    }
}

pub struct RecordingMeshes {
    pub log: EventLog,
    pub loaded: HashSet<Primitive>,
}

impl RecordingMeshes {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
            loaded: HashSet::new(),
        }
    }
}

impl MeshLibrary for RecordingMeshes {
    fn load(&mut self, primitive: Primitive) -> Result<(), String> {
        self.loaded.insert(primitive);
        Ok(())
    }

    fn draw(&self, primitive: Primitive) {
        assert!(self.loaded.contains(&primitive), "{primitive:?} not loaded");
        self.log.borrow_mut().push(Event::Draw(primitive));
    }
}

/// A texture device that hands out sequential ids and remembers what happened to them.
pub struct FakeDevice {
    pub max_size: u32,
    pub next_id: u32,
    pub uploaded: Vec<TextureId>,
    pub bound: Vec<(u32, TextureId)>,
    /// Shared so it can be inspected after the scene owning the device is dropped.
    pub released: Rc<RefCell<Vec<TextureId>>>,
    pub fail_upload: bool,
}

impl FakeDevice {
    pub fn new(max_size: u32) -> Self {
        Self {
            max_size,
            next_id: 1,
            uploaded: Vec::new(),
            bound: Vec::new(),
            released: Rc::default(),
            fail_upload: false,
        }
    }
}

impl TextureDevice for FakeDevice {
    fn max_texture_size(&self) -> u32 {
        self.max_size
    }

    fn upload(&mut self, _image: &TextureImage) -> Result<TextureId, TextureError> {
        if self.fail_upload {
            return Err(TextureError::Gl {
                call: "glTexImage2D",
                code: 0x0505,
            });
        }
        let id = TextureId(NonZero::new(self.next_id).expect("ids start at 1"));
        self.next_id += 1;
        self.uploaded.push(id);
        Ok(id)
    }

    fn bind(&mut self, unit: u32, id: TextureId) {
        self.bound.push((unit, id));
    }

    fn release(&mut self, id: TextureId) {
        self.released.borrow_mut().push(id);
    }
}

/// A solid image with a valid pixel buffer.
pub fn solid_image(width: u32, height: u32, channels: u8) -> TextureImage {
    TextureImage {
        width,
        height,
        channels,
        pixels: vec![128; width as usize * height as usize * channels as usize],
    }
}
