use gloo::net::http::Request;
use shared::{
    CalendarView, HolidayRecord, ScheduleListResponse, ScheduleQuery, UpcomingHoliday,
    UpdateStatusRequest, WidgetConfig,
};

/// API client for the scheduling server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Get the holidays of one month
    pub async fn get_month_holidays(&self, view: CalendarView) -> Result<Vec<HolidayRecord>, String> {
        let url = self.url(&view.holidays_path());

        match Request::get(&url).send().await {
            Ok(response) => {
                if !response.ok() {
                    return Err(format!("Server error {}", response.status()));
                }
                match response.json::<Vec<HolidayRecord>>().await {
                    Ok(data) => Ok(data),
                    Err(e) => Err(format!("Failed to parse holidays: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to fetch holidays: {}", e)),
        }
    }

    /// Get the list of upcoming holidays
    pub async fn get_upcoming_holidays(&self) -> Result<Vec<UpcomingHoliday>, String> {
        let url = self.url("/api/holidays/");

        match Request::get(&url).send().await {
            Ok(response) => {
                if !response.ok() {
                    return Err(format!("Server error {}", response.status()));
                }
                match response.json::<Vec<UpcomingHoliday>>().await {
                    Ok(data) => Ok(data),
                    Err(e) => Err(format!("Failed to parse upcoming holidays: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to fetch upcoming holidays: {}", e)),
        }
    }

    /// Persist the user's status. Any non-2xx answer is an error.
    pub async fn update_status(
        &self,
        request: &UpdateStatusRequest,
        csrf_header: &str,
        csrf_token: Option<&str>,
    ) -> Result<(), String> {
        let url = self.url("/update_status/");

        let mut builder = Request::post(&url);
        if let Some(token) = csrf_token {
            builder = builder.header(csrf_header, token);
        }

        match builder
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let status = response.status();
                    let error_text = response.text().await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(format!("Server error {}: {}", status, error_text))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get schedules, optionally narrowed on the server
    pub async fn get_schedules(&self, query: &ScheduleQuery) -> Result<ScheduleListResponse, String> {
        let url = format!("{}{}", self.url("/api/schedules/"), query.to_query_string());

        match Request::get(&url).send().await {
            Ok(response) => {
                if !response.ok() {
                    return Err(format!("Server error {}", response.status()));
                }
                match response.json::<ScheduleListResponse>().await {
                    Ok(data) => Ok(data),
                    Err(e) => Err(format!("Failed to parse schedules: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to fetch schedules: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
