mod concurrency;
mod dispatcher;
mod scenarios;
