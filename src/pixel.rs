/// A single 8-bit RGBA sample read from the source image.
///
/// The alpha channel only takes part in filtering and never ends up in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Pixel {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    pub fn from_image_pixel<P>(pixel: &P) -> Self
    where
        P: image::Pixel<Subpixel = u8>,
    {
        let [red, green, blue, alpha] = pixel.to_rgba().0;
        Self::new(red, green, blue, alpha)
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn alpha(self) -> u8 {
        self.alpha
    }

    /// Mean of the three color channels on a 0-255 scale.
    pub fn brightness(self) -> f32 {
        (self.red as f32 + self.green as f32 + self.blue as f32) / 3.0
    }

    /// Euclidean distance to another pixel in RGB space, alpha ignored.
    pub fn distance(self, other: Pixel) -> f32 {
        rgb_distance(
            (self.red as f32, self.green as f32, self.blue as f32),
            (other.red as f32, other.green as f32, other.blue as f32),
        )
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

pub(crate) fn rgb_distance(lhs: (f32, f32, f32), rhs: (f32, f32, f32)) -> f32 {
    let dr = lhs.0 - rhs.0;
    let dg = lhs.1 - rhs.1;
    let db = lhs.2 - rhs.2;

    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_and_zero_padded() {
        assert_eq!(Pixel::opaque((0x33, 0x66, 0xcc)).hex(), "#3366CC");
        assert_eq!(Pixel::opaque((0, 10, 255)).hex(), "#000AFF");
    }

    #[test]
    fn distance_ignores_alpha() {
        let a = Pixel::new(0, 0, 0, 0);
        let b = Pixel::new(3, 4, 0, 255);

        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn from_image_pixel_fills_alpha() {
        let pixel = Pixel::from_image_pixel(&image::Rgb([1u8, 2, 3]));

        assert_eq!(pixel.rgb(), (1, 2, 3));
        assert_eq!(pixel.alpha(), 255);
    }
}
