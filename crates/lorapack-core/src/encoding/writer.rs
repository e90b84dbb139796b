use crate::schema::FieldDescriptor;
use crate::EncodeError;

#[derive(Debug)]
pub struct FrameWriter<'a> {
    buf: &'a mut [u8],
}

impl<'a> FrameWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf
    }

    /// Mutable view of the bytes `field` spans.
    pub fn field_bytes_mut(&mut self, field: &FieldDescriptor) -> Result<&mut [u8], EncodeError> {
        let len = self.buf.len();
        self.buf
            .get_mut(field.byte_start..=field.byte_end)
            .ok_or(EncodeError::OutOfBounds {
                byte_start: field.byte_start,
                byte_end: field.byte_end,
                len,
            })
    }

    /// Copies `data` over the field's byte range. `data` must match its width exactly.
    pub fn write_field(&mut self, field: &FieldDescriptor, data: &[u8]) -> Result<(), EncodeError> {
        let target = self.field_bytes_mut(field)?;
        if target.len() != data.len() {
            return Err(EncodeError::InvalidWidth {
                expected: data.len(),
                actual: target.len(),
            });
        }
        target.copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FrameWriter;
    use crate::schema::FieldDescriptor;
    use crate::EncodeError;

    #[test]
    fn writes_in_place() {
        let mut buf = [0u8; 4];
        let mut w = FrameWriter::new(&mut buf);
        w.write_field(&FieldDescriptor::raw("mid", 1, 2), &[7, 8]).unwrap();
        assert_eq!(w.as_bytes(), &[0, 7, 8, 0]);
    }

    #[test]
    fn writer_bounds() {
        let mut buf = [0u8; 2];
        let mut w = FrameWriter::new(&mut buf);
        assert_eq!(
            w.write_field(&FieldDescriptor::raw("tail", 1, 2), &[1, 2])
                .unwrap_err(),
            EncodeError::OutOfBounds {
                byte_start: 1,
                byte_end: 2,
                len: 2
            }
        );
        assert!(matches!(
            w.write_field(&FieldDescriptor::raw("b", 0, 1), &[1])
                .unwrap_err(),
            EncodeError::InvalidWidth { .. }
        ));
    }
}
