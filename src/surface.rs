use crate::geometry::Point;

/// Host window the menu is shown on.
///
/// Implemented by the toolkit adapter. The menu pairs every `grab_input` with
/// exactly one `release_input`.
pub trait Surface {
    /// Map the surface with its top-left corner at `origin`.
    fn show(&mut self, origin: Point, size: f64);
    fn hide(&mut self);
    /// Reposition an already visible surface.
    fn move_to(&mut self, origin: Point, size: f64);
    /// Route all pointer and keyboard input to the menu.
    fn grab_input(&mut self);
    fn release_input(&mut self);
}
