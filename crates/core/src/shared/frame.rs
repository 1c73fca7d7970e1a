/// A single captured camera frame: contiguous pixel bytes in row-major order.
///
/// The orchestrator never looks at pixels; the frame is handed through to
/// the geometry provider as-is. `index` identifies the frame within its
/// capture session.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// A frame with no pixel data, for providers that only key on `index`.
    pub fn placeholder(index: usize) -> Self {
        Self::new(Vec::new(), 0, 0, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `data` holds exactly `width * height * channels` bytes.
    /// Frames are not checked on construction; providers decide what to do
    /// with a malformed one.
    pub fn has_expected_len(&self) -> bool {
        self.data.len() == (self.width as usize) * (self.height as usize) * (self.channels as usize)
    }
}
