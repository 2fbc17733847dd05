//! Texture resource management for wgpu
//!
//! Provides the grid texture: an RGBA8 texture with one texel per cell,
//! sampled with nearest filtering so zoomed cells stay sharp.

/// GPU texture resource containing texture, view, and sampler
///
/// Bundles the three main components needed for texture operations:
/// - Texture: The actual GPU memory allocation
/// - View: Interface for shader access
/// - Sampler: Filtering and addressing configuration
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    size: wgpu::Extent3d,
}

impl TextureResource {
    /// Format of the grid texture; colours are written through unchanged
    pub const GRID_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates an empty 2D RGBA texture that can be rewritten every frame
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `width` - Width of the texture in texels
    /// * `height` - Height of the texture in texels
    /// * `label` - Debug label for the texture
    /// * `filter_mode` - Texture filtering mode (Nearest for sharp, Linear for smooth)
    pub fn create_rgba_with_filter(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
        filter_mode: wgpu::FilterMode,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::GRID_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter_mode,
            min_filter: filter_mode,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size,
        }
    }

    /// Texel dimensions
    pub fn size(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }

    /// Uploads RGBA8 rows that are `bytes_per_row` bytes apart
    ///
    /// `data` must hold at least `bytes_per_row * (height - 1) + 4 * width`
    /// bytes.
    pub fn write(&self, queue: &wgpu::Queue, data: &[u8], bytes_per_row: u32) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(self.size.height),
            },
            self.size,
        );
    }

    /// Smallest buffer [`Self::write`] accepts for the given row pitch
    pub fn required_len(&self, bytes_per_row: usize) -> usize {
        let (width, height) = (self.size.width as usize, self.size.height as usize);
        bytes_per_row * (height - 1) + 4 * width
    }
}
