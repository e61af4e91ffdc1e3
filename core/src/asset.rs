//! LVGL image descriptors rendered as C source.

use alloc::string::String;
use core::fmt::{self, Write};

use crate::rgb565::Rgb565Buffer;

pub const LVGL_INCLUDE: &str = "#include \"lvgl.h\"";
pub const ATTRIBUTE_MEM_ALIGN: &str = "LV_ATTRIBUTE_MEM_ALIGN";
pub const ATTRIBUTE_LARGE_CONST: &str = "LV_ATTRIBUTE_LARGE_CONST";
pub const DESCRIPTOR_TYPE: &str = "lv_image_dsc_t";
pub const HEADER_MAGIC: &str = "LV_IMAGE_HEADER_MAGIC";
pub const COLOR_FORMAT_RGB565: &str = "LV_COLOR_FORMAT_RGB565";

/// Values per line of the pixel array.
pub const BYTES_PER_LINE: usize = 16;

/// C identifier derived from an image file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Replaces `-`, ` ` and `.` with `_`. Nothing else is escaped.
    pub fn from_file_stem(stem: &str) -> Self {
        Symbol(
            stem.chars()
                .map(|c| match c {
                    '-' | ' ' | '.' => '_',
                    c => c,
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn map_name(&self) -> String {
        alloc::format!("{}_map", self.0)
    }

    pub fn descriptor_name(&self) -> String {
        alloc::format!("img_{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct ImageAsset<'a> {
    pub symbol: &'a Symbol,
    pub pixels: &'a Rgb565Buffer,
}

impl<'a> ImageAsset<'a> {
    pub fn new(symbol: &'a Symbol, pixels: &'a Rgb565Buffer) -> Self {
        Self { symbol, pixels }
    }

    pub fn write_c_source(&self, out: &mut impl Write) -> fmt::Result {
        let map = self.symbol.map_name();

        writeln!(out, "{LVGL_INCLUDE}")?;
        writeln!(out)?;
        writeln!(out, "{ATTRIBUTE_MEM_ALIGN}")?;
        writeln!(out, "{ATTRIBUTE_LARGE_CONST}")?;
        writeln!(out, "static const uint8_t {map}[] = {{")?;
        for chunk in self.pixels.as_bytes().chunks(BYTES_PER_LINE) {
            out.write_str("   ")?;
            for byte in chunk {
                write!(out, " 0x{byte:02X},")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;

        writeln!(out, "const {DESCRIPTOR_TYPE} {} = {{", self.symbol.descriptor_name())?;
        writeln!(out, "    .header.magic = {HEADER_MAGIC},")?;
        writeln!(out, "    .header.cf = {COLOR_FORMAT_RGB565},")?;
        writeln!(out, "    .header.w = {},", self.pixels.width())?;
        writeln!(out, "    .header.h = {},", self.pixels.height())?;
        writeln!(out, "    .data_size = sizeof({map}),")?;
        writeln!(out, "    .data = {map},")?;
        writeln!(out, "}};")
    }

    pub fn to_c_source(&self) -> String {
        // header, footer and roughly six characters per byte
        let mut source = String::with_capacity(512 + self.pixels.len() * 6);
        // Writing into a String cannot fail.
        let _ = self.write_c_source(&mut source);
        source
    }
}
