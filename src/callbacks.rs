// ----------------------------------------------------------------------------
// Bundled callback registration, mirroring the original `CallbackFuncs`
// struct: all four host hooks are registered together rather than through
// four independent setters, so "callbacks not fully registered" is a single
// completeness check at `init()` instead of four.
// ----------------------------------------------------------------------------
#[derive(Default)]
pub struct Callbacks {
    get_height: Option<Box<dyn FnMut(i32, i32) -> u8>>,
    dist_to_camera: Option<Box<dyn FnMut(i32, i32) -> f32>>,
    sphere_in_frustum: Option<Box<dyn FnMut(f32, f32, f32) -> bool>>,
    send_vertex: Option<Box<dyn FnMut(i32, i32)>>,
}
// ----------------------------------------------------------------------------
impl Callbacks {
    // ------------------------------------------------------------------------
    pub fn new() -> Self {
        Self::default()
    }
    // ------------------------------------------------------------------------
    /// sample the heightmap at integer grid coordinates; in range.
    pub fn get_height(mut self, f: impl FnMut(i32, i32) -> u8 + 'static) -> Self {
        self.get_height = Some(Box::new(f));
        self
    }
    // ------------------------------------------------------------------------
    /// Euclidean distance in world units from the camera to a grid point.
    pub fn dist_to_camera(mut self, f: impl FnMut(i32, i32) -> f32 + 'static) -> Self {
        self.dist_to_camera = Some(Box::new(f));
        self
    }
    // ------------------------------------------------------------------------
    /// true iff the sphere at (x, y, radius) intersects or is inside the
    /// current view frustum.
    pub fn sphere_in_frustum(mut self, f: impl FnMut(f32, f32, f32) -> bool + 'static) -> Self {
        self.sphere_in_frustum = Some(Box::new(f));
        self
    }
    // ------------------------------------------------------------------------
    /// emit one vertex; called in leaf-triangle order during `draw`.
    pub fn send_vertex(mut self, f: impl FnMut(i32, i32) + 'static) -> Self {
        self.send_vertex = Some(Box::new(f));
        self
    }
    // ------------------------------------------------------------------------
    pub fn is_complete(&self) -> bool {
        self.get_height.is_some()
            && self.dist_to_camera.is_some()
            && self.sphere_in_frustum.is_some()
            && self.send_vertex.is_some()
    }
    // ------------------------------------------------------------------------
    pub(crate) fn call_get_height(&mut self, x: i32, y: i32) -> u8 {
        (self.get_height.as_mut().expect("callbacks not registered"))(x, y)
    }
    // ------------------------------------------------------------------------
    pub(crate) fn call_dist_to_camera(&mut self, x: i32, y: i32) -> f32 {
        (self.dist_to_camera.as_mut().expect("callbacks not registered"))(x, y)
    }
    // ------------------------------------------------------------------------
    pub(crate) fn call_sphere_in_frustum(&mut self, x: f32, y: f32, radius: f32) -> bool {
        (self
            .sphere_in_frustum
            .as_mut()
            .expect("callbacks not registered"))(x, y, radius)
    }
    // ------------------------------------------------------------------------
    pub(crate) fn call_send_vertex(&mut self, x: i32, y: i32) {
        (self.send_vertex.as_mut().expect("callbacks not registered"))(x, y)
    }
    // ------------------------------------------------------------------------
}
