use std::{convert::Infallible, sync::Arc};
use warp::{self, Filter};

use crate::library::GameStore;

pub fn with_store(
    store: Arc<dyn GameStore>,
) -> impl Filter<Extract = (Arc<dyn GameStore>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&store))
}
