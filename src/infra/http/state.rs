use std::sync::Arc;

use crate::application::pages::PageService;
use crate::application::posts::PostService;

#[derive(Clone)]
pub struct ApiState {
    pub posts: Arc<PostService>,
    pub pages: Arc<PageService>,
}
