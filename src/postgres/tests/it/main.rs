mod weather_request;
