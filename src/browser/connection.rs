use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{BrowserError, Result};

/// 连接到浏览器并定位测评页面
///
/// 指定 target_url 时新建页面并导航过去；
/// 否则附着到当前第一个已打开的页面（通常就是活动标签页）
pub async fn connect_to_assessment_page(
    port: u16,
    target_url: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::ConnectionFailed {
            port,
            source: Box::new(e),
        }
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    if let Some(url) = target_url {
        debug!("创建新页面并导航到: {}", url);
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed {
                source: Box::new(e),
            })?;
        page.goto(url).await.map_err(|e| BrowserError::NavigationFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        info!("已导航到: {}", url);
        return Ok((browser, page));
    }

    let pages = browser
        .pages()
        .await
        .map_err(|e| BrowserError::ConnectionFailed {
            port,
            source: Box::new(e),
        })?;
    debug!("获取到 {} 个页面", pages.len());

    match pages.into_iter().next() {
        Some(page) => {
            if let Ok(Some(title)) = page.get_title().await {
                info!("✓ 附着到当前页面: {}", title);
            }
            Ok((browser, page))
        }
        None => {
            debug!("没有已打开的页面，创建空白页面");
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| BrowserError::PageCreationFailed {
                    source: Box::new(e),
                })?;
            Ok((browser, page))
        }
    }
}
