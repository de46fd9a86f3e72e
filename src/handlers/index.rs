use axum::response::Html;

/// GET / - route index
pub async fn index() -> Html<&'static str> {
    Html(ROUTE_INDEX)
}

const ROUTE_INDEX: &str = concat!(
    "Welcome to the climate observation API<br>",
    "Available Routes:<br>",
    "~~~~~~~~~~~~~~~~~~~~~~~~~<br>",
    "1. Precipitation for the last 12 months of data<br>",
    "/api/v1.0/precipitation<br>",
    "............................<br>",
    "2. List of stations<br>",
    "/api/v1.0/stations<br>",
    "............................<br>",
    "3. Dates and temperature observations of the most-active station for the last 12 months of data<br>",
    "/api/v1.0/tobs<br>",
    "............................<br>",
    "4. Minimum, average and maximum temperature from a start date, or between two dates (inclusive)<br>",
    "/api/v1.0/start-end?start=YYYY-MM-DD&amp;end=YYYY-MM-DD<br>",
    "/api/v1.0/temperature/&lt;start&gt;<br>",
    "/api/v1.0/temperature/&lt;start&gt;/&lt;end&gt;<br>",
    "~~~~~~~~~~~~~~~~~~~~~~~~~<br>",
);
