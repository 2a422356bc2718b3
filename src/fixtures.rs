//! Report text shaped like real load-test output, for tests.

/// Builder for a single report block.
pub struct Block {
    pub path: &'static str,
    pub concurrency: &'static str,
    pub complete: &'static str,
    pub failed: &'static str,
    pub breakdown: Option<&'static str>,
    pub non_2xx: Option<&'static str>,
    pub total_transferred: bool,
    pub rps: &'static str,
    pub mean: &'static str,
    pub percentiles: (&'static str, &'static str, &'static str),
}

impl Default for Block {
    fn default() -> Self {
        Self {
            path: "/api/test",
            concurrency: "10",
            complete: "1000",
            failed: "0",
            breakdown: None,
            non_2xx: None,
            total_transferred: true,
            rps: "523.45",
            mean: "19.1",
            percentiles: ("18", "25", "40"),
        }
    }
}

impl Block {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("This is ApacheBench, Version 2.3 <$Revision: 1879490 $>\n");
        out.push_str("Benchmarking localhost (be patient)\n");
        out.push_str("Completed 1000 requests\n");
        out.push_str("Finished 1000 requests\n\n\n");
        out.push_str("Server Software:        nginx/1.25.3\n");
        out.push_str("Server Hostname:        localhost\n");
        out.push_str("Server Port:            8080\n\n");
        out.push_str(&format!("Document Path:          {}\n", self.path));
        out.push_str("Document Length:        612 bytes\n\n");
        out.push_str(&format!("Concurrency Level:      {}\n", self.concurrency));
        out.push_str("Time taken for tests:   1.910 seconds\n");
        out.push_str(&format!("Complete requests:      {}\n", self.complete));
        out.push_str(&format!("Failed requests:        {}\n", self.failed));
        if let Some(line) = self.breakdown {
            out.push_str(line);
            out.push('\n');
        }
        if let Some(n) = self.non_2xx {
            out.push_str(&format!("Non-2xx responses:      {n}\n"));
        }
        if self.total_transferred {
            out.push_str("Total transferred:      845000 bytes\n");
        }
        out.push_str("HTML transferred:       612000 bytes\n");
        out.push_str(&format!("Requests per second:    {} [#/sec] (mean)\n", self.rps));
        out.push_str(&format!("Time per request:       {} [ms] (mean)\n", self.mean));
        out.push_str(
            "Time per request:       1.910 [ms] (mean, across all concurrent requests)\n",
        );
        out.push_str("Transfer rate:          432.10 [Kbytes/sec] received\n\n");
        out.push_str("Connection Times (ms)\n");
        out.push_str("              min  mean[+/-sd] median   max\n");
        out.push_str("Connect:        0    0   0.1      0       1\n");
        out.push_str("Processing:     2   19   3.2     18      45\n");
        out.push_str("Waiting:        1   18   3.1     18      44\n");
        out.push_str("Total:          2   19   3.2     18      45\n\n");
        out.push_str("Percentage of the requests served within a certain time (ms)\n");
        let (p50, p90, p99) = self.percentiles;
        out.push_str(&format!("  50%     {p50}\n"));
        out.push_str("  66%     20\n");
        out.push_str("  75%     21\n");
        out.push_str("  80%     22\n");
        out.push_str(&format!("  90%     {p90}\n"));
        out.push_str("  95%     30\n");
        out.push_str("  98%     35\n");
        out.push_str(&format!("  99%     {p99}\n"));
        out.push_str(" 100%     45 (longest request)\n");
        out
    }
}
