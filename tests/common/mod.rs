//! Shared helpers for integration tests
//!
//! `OneShotServer` answers exactly one HTTP request on a loopback port with
//! a canned response and hands back the raw request it received.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub fn start(status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            content_type,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                request.push_str(&line);
            }

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn json(body: &str) -> Self {
        Self::start(200, "application/json", body)
    }

    pub fn csv(body: &str) -> Self {
        Self::start(200, "text/csv", body)
    }

    /// Wait for the request and return its request line and headers
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// CoinDesk-style body for the given `(date, price)` pairs
pub fn price_json(prices: &[(&str, f64)]) -> String {
    let entries: Vec<String> = prices
        .iter()
        .map(|(d, p)| format!("\"{}\":{}", d, p))
        .collect();
    format!(
        "{{\"bpi\":{{{}}},\"disclaimer\":\"test\",\"time\":{{\"updated\":\"now\"}}}}",
        entries.join(",")
    )
}

/// ECB-style CSV body for the given `(date, rate)` pairs
pub fn rate_csv(rates: &[(&str, f64)]) -> String {
    let mut body = String::from("KEY,FREQ,CURRENCY,CURRENCY_DENOM,EXR_TYPE,EXR_SUFFIX,TIME_PERIOD,OBS_VALUE\n");
    for (d, r) in rates {
        body.push_str(&format!("EXR.D.USD.EUR.SP00.A,D,USD,EUR,SP00,A,{},{}\n", d, r));
    }
    body
}
