/// 简体字表，与 `TRADITIONAL` 按位置一一对应
pub(super) const SIMPLIFIED: &str = concat!(
    "这个们来时为说国会对发后过学么实点现动进经长开关问间题应样还没当东两从机业种电产",
    "让无认别体处见头并话结员变义与门气边写条记设计务数据录码户册页删编辑确输请选择错",
    "误败网络连载资帐号验证邮语简统显隐单详细状态类创导传帮欢复贴图视频声乐报订购买卖",
    "价钱币银优积级权组织项论评丝热荐阅读历筛总运费称龄职标签备转换旧绑账余额里钟针钥",
    "锁链键盘护许试询该调谢识课议讯访贵质负责赢赛货贸宝宽审宁专将尽层岁广庆库异弃张弹",
    "强归彻径忆怀恶悬惊惯愿战扩扫扬执扰担拟损携摄摆敌断晓暂术杂杀构档桥检欧残毕汇汉沟",
    "泽测浏览济浅滚满滤灯灵炼烟爱牵独环画疗盖礼离稳穷竞笔练终绍给继续维综缓缩罗联肤脑",
    "脚节范获营蓝虽补装观规觉触讨训讲诉词译谁谈贝赏车轮软轻较达迁远迟递钮铁闭闻队阶际",
    "陆险随难雾须顶顺预领颜风飞饭馆马鱼鸟齐龙亲仅众伤侧储兑决况准凤击刘则刚剧劝办劳势",
    "区医华协卫厂压县参双叶叹听启响围园团坏块坚场够夺奋奖妇妈孙宪宫寿届岛师帅带帘庄庐",
    "废弯彦忧怜恋悦惧惨戏扑托抚抢拥拨挂挥掷搁撑昼晋晒书朴杨极枪柜梦楼毁汤泪洁浇涂润涨",
    "渐温湾湿滨灭灾炉烦烧焕爷牍犹猎猪献玛珑琐畅疮疯监盐础碍祸窃竖笼筑粮紧纠红约纪纯纲",
    "纳纵纷纸线绕绘绝绩绪绳绵绿缘缴罚罢聪肃胜胶脏脸舰舱艺苏苹荣药莱萝着虑虚虾蚁袜誉诈",
    "诗诚诸谋谓谱贡财贤贩贪贫贯贺赋赌赔赖赚赞赠赵赶趋跃践轨轩轴辅辆辈辉辞迈违适逻遗邻",
    "郑酱释钓钢铃铺销锅锋锦镇镜闪闯闹阔阳阴阵陈隶雏雳静韩顾顿飘饥饮饰饱饼驱驶驻驾骂骑",
    "骗鲁鲜鸡鸣麦黄齿",
);

/// 繁体字表
pub(super) const TRADITIONAL: &str = concat!(
    "這個們來時為說國會對發後過學麼實點現動進經長開關問間題應樣還沒當東兩從機業種電產",
    "讓無認別體處見頭並話結員變義與門氣邊寫條記設計務數據錄碼戶冊頁刪編輯確輸請選擇錯",
    "誤敗網絡連載資帳號驗證郵語簡統顯隱單詳細狀態類創導傳幫歡復貼圖視頻聲樂報訂購買賣",
    "價錢幣銀優積級權組織項論評絲熱薦閱讀歷篩總運費稱齡職標簽備轉換舊綁賬餘額裡鐘針鑰",
    "鎖鏈鍵盤護許試詢該調謝識課議訊訪貴質負責贏賽貨貿寶寬審寧專將盡層歲廣慶庫異棄張彈",
    "強歸徹徑憶懷惡懸驚慣願戰擴掃揚執擾擔擬損攜攝擺敵斷曉暫術雜殺構檔橋檢歐殘畢匯漢溝",
    "澤測瀏覽濟淺滾滿濾燈靈煉煙愛牽獨環畫療蓋禮離穩窮競筆練終紹給繼續維綜緩縮羅聯膚腦",
    "腳節範獲營藍雖補裝觀規覺觸討訓講訴詞譯誰談貝賞車輪軟輕較達遷遠遲遞鈕鐵閉聞隊階際",
    "陸險隨難霧須頂順預領顏風飛飯館馬魚鳥齊龍親僅眾傷側儲兌決況準鳳擊劉則剛劇勸辦勞勢",
    "區醫華協衛廠壓縣參雙葉嘆聽啟響圍園團壞塊堅場夠奪奮獎婦媽孫憲宮壽屆島師帥帶簾莊廬",
    "廢彎彥憂憐戀悅懼慘戲撲託撫搶擁撥掛揮擲擱撐晝晉曬書樸楊極槍櫃夢樓毀湯淚潔澆塗潤漲",
    "漸溫灣濕濱滅災爐煩燒煥爺牘猶獵豬獻瑪瓏瑣暢瘡瘋監鹽礎礙禍竊豎籠築糧緊糾紅約紀純綱",
    "納縱紛紙線繞繪絕績緒繩綿綠緣繳罰罷聰肅勝膠髒臉艦艙藝蘇蘋榮藥萊蘿著慮虛蝦蟻襪譽詐",
    "詩誠諸謀謂譜貢財賢販貪貧貫賀賦賭賠賴賺讚贈趙趕趨躍踐軌軒軸輔輛輩輝辭邁違適邏遺鄰",
    "鄭醬釋釣鋼鈴鋪銷鍋鋒錦鎮鏡閃闖鬧闊陽陰陣陳隸雛靂靜韓顧頓飄飢飲飾飽餅驅駛駐駕罵騎",
    "騙魯鮮雞鳴麥黃齒",
);

/// 繁转简的额外多对一条目（简转繁方向只保留一种写法）
pub(super) const TRADITIONAL_EXTRA: &[(char, char)] = &[
    ('髮', '发'), ('幹', '干'), ('乾', '干'), ('裏', '里'),
    ('複', '复'), ('鍾', '钟'), ('臺', '台'), ('檯', '台'),
    ('颱', '台'), ('隻', '只'), ('纔', '才'), ('甦', '苏'),
    ('噁', '恶'), ('係', '系'), ('繫', '系'), ('慾', '欲'),
    ('鬆', '松'), ('製', '制'), ('週', '周'), ('穫', '获'),
    ('歷', '历'), ('曆', '历'), ('蹟', '迹'), ('瞭', '了'),
];
