pub type RouteKey = u16;
