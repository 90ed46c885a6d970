//! ==============================================================================
//! page.rs - dashboard html
//! ==============================================================================
//!
//! the page is static apart from the viewer's ip and the history size. the
//! readings themselves are filled in
//! client-side by polling GET /api/data every 2 seconds, so the page never
//! touches the store itself.
//!
//! ==============================================================================

/// render the dashboard for a viewer at `viewer_ip`, for a history of `capacity` entries
pub fn render_dashboard(viewer_ip: &str, capacity: usize) -> String {
    DASHBOARD_TEMPLATE
        .replace("{{VIEWER_IP}}", &html_escape(viewer_ip))
        .replace("{{CAPACITY}}", &capacity.to_string())
}

/// escape html special characters to prevent xss
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Sensor Data</title>
    <style>
        body { font-family: system-ui, Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
        .client-info { background: #e9ecef; padding: 10px 15px; border-radius: 4px; margin-bottom: 20px; font-size: 0.9em; color: #495057; }
        .container { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 20px; }
        .data-box { background: #f8f9fa; padding: 15px; border-left: 4px solid #007bff; margin: 10px 0; border-radius: 4px; }
        .timestamp { color: #6c757d; font-size: 0.9em; margin-bottom: 10px; }
        .value { font-size: 1.2em; font-weight: bold; color: #28a745; }
        .history-table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        .history-table th, .history-table td { border: 1px solid #dee2e6; padding: 8px 12px; text-align: left; }
        .history-table th { background: #f8f9fa; }
        .history-table tr:nth-child(even) { background: #f8f9fa; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Sensor Data</h1>
        <div class="client-info"><strong>Your IP:</strong> {{VIEWER_IP}}</div>
        <div id="current-data"><p>No data received yet...</p></div>
    </div>

    <div class="container">
        <h2>History (Last {{CAPACITY}} entries)</h2>
        <div id="history"></div>
    </div>

    <script>
        function esc(v) {
            return String(v).replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;').replace(/"/g, '&quot;');
        }
        function field(obj, key) {
            return obj && obj[key] !== undefined && obj[key] !== null ? esc(obj[key]) : 'N/A';
        }

        function updateData() {
            fetch('/api/data')
                .then(function (response) { return response.json(); })
                .then(function (data) {
                    if (data.sensor_data) {
                        var s = data.sensor_data;
                        document.getElementById('current-data').innerHTML =
                            '<div class="data-box">' +
                                '<div class="timestamp">' + esc(data.last_update || 'N/A') + '</div>' +
                                '<div>Client IP: <strong>' + field(s, 'client_ip') + '</strong></div>' +
                                '<div>Sensor: ' + field(s, 'sensor') + '</div>' +
                                '<div>Value 1: <span class="value">' + field(s, 'value1') + '</span></div>' +
                                '<div>Value 2: <span class="value">' + field(s, 'value2') + '</span></div>' +
                            '</div>';
                    }

                    var html = '<p>No history data available</p>';
                    if (data.history && data.history.length > 0) {
                        html = '<table class="history-table"><thead><tr>' +
                            '<th>Time</th><th>IP Address</th><th>Value 1</th><th>Value 2</th>' +
                            '</tr></thead><tbody>';
                        // newest first
                        data.history.slice().reverse().forEach(function (item) {
                            html += '<tr>' +
                                '<td>' + esc(item.timestamp || 'N/A') + '</td>' +
                                '<td>' + field(item.data, 'client_ip') + '</td>' +
                                '<td class="value">' + field(item.data, 'value1') + '</td>' +
                                '<td class="value">' + field(item.data, 'value2') + '</td>' +
                                '</tr>';
                        });
                        html += '</tbody></table>';
                    }
                    document.getElementById('history').innerHTML = html;
                })
                .catch(function (error) {
                    console.error('Error fetching data:', error);
                });
        }

        updateData();
        setInterval(updateData, 2000);
    </script>
</body>
</html>
"#;
