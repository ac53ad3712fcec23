pub mod converter;
pub mod resizer;

pub use converter::{
    apply_constraints, encode_png_data_uri, load_texture_data_uri, load_texture_file, save_texture,
    ConvertedTexture, LoadedTexture, TextureConstraints,
};
