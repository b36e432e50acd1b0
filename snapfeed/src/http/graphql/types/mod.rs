mod post;
mod post_image;
mod profile;
mod session;
mod user;

pub use self::post::Post;
pub use self::post_image::PostImage;
pub use self::profile::Profile;
pub use self::session::Session;
pub use self::user::User;
